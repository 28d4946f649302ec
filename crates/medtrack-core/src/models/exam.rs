//! Exam records and their status cycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::date::DateBound;

/// Progress of an exam, advanced by an administrator one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    /// Scheduled, not yet performed
    ToDo,
    /// Performed, waiting on results
    Pending,
    /// Results ready to be picked up
    ToCollect,
    /// Results delivered
    Done,
}

impl ExamStatus {
    /// The cycle in display order.
    pub const CYCLE: [ExamStatus; 4] = [
        ExamStatus::ToDo,
        ExamStatus::Pending,
        ExamStatus::ToCollect,
        ExamStatus::Done,
    ];

    /// Next status in the cycle. `Done` wraps back to `ToDo`.
    pub fn successor(self) -> Self {
        match self {
            ExamStatus::ToDo => ExamStatus::Pending,
            ExamStatus::Pending => ExamStatus::ToCollect,
            ExamStatus::ToCollect => ExamStatus::Done,
            ExamStatus::Done => ExamStatus::ToDo,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExamStatus::ToDo => "to_do",
            ExamStatus::Pending => "pending",
            ExamStatus::ToCollect => "to_collect",
            ExamStatus::Done => "done",
        }
    }
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized status name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown exam status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for ExamStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Legacy names written by the first version of the mobile app.
        match s.trim().to_lowercase().as_str() {
            "to_do" | "a_fazer" => Ok(ExamStatus::ToDo),
            "pending" | "pendente" => Ok(ExamStatus::Pending),
            "to_collect" | "a_buscar" => Ok(ExamStatus::ToCollect),
            "done" | "concluido" => Ok(ExamStatus::Done),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Status predicate used by the exam list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ExamStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ExamStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todos" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

/// A scheduled exam or consultation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamRecord {
    /// Unique record ID
    pub id: String,
    /// Name of the patient the exam belongs to
    pub patient_name: String,
    /// Exam day. `None` when the stored value was missing or unreadable.
    pub date: Option<DateBound>,
    /// Exam type (e.g., "Consulta", "Raio-X")
    pub kind: String,
    /// Medical specialty (e.g., "Cardiologia")
    pub specialty: String,
    /// Current progress
    pub status: ExamStatus,
}

impl ExamRecord {
    /// Create a new exam at the start of the status cycle.
    pub fn new(patient_name: String, date: DateBound, kind: String, specialty: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_name,
            date: Some(date),
            kind,
            specialty,
            status: ExamStatus::ToDo,
        }
    }

    /// Copy of this record with the status moved one step along the cycle.
    pub fn advanced(&self) -> Self {
        Self {
            status: self.status.successor(),
            ..self.clone()
        }
    }
}
