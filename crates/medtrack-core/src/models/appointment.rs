//! Consultations and exams a patient schedules for themselves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::date::DateBound;

/// Error for an unrecognized appointment kind or status name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown appointment {field}: {value:?}")]
pub struct ParseAppointmentError {
    pub field: &'static str,
    pub value: String,
}

/// What is being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentKind {
    /// A consultation; the detail names the specialty
    Consultation,
    /// An exam; the detail names the exam type
    Exam,
}

impl AppointmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentKind::Consultation => "consultation",
            AppointmentKind::Exam => "exam",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentKind::Consultation => "Consultation",
            AppointmentKind::Exam => "Exam",
        }
    }
}

impl fmt::Display for AppointmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentKind {
    type Err = ParseAppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "consultation" | "consulta" => Ok(AppointmentKind::Consultation),
            "exam" | "exame" => Ok(AppointmentKind::Exam),
            _ => Err(ParseAppointmentError {
                field: "kind",
                value: s.to_string(),
            }),
        }
    }
}

/// Where a booking stands. New bookings are confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Only confirmed bookings are still ahead of the patient.
    pub fn is_upcoming(&self) -> bool {
        *self == AppointmentStatus::Confirmed
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ParseAppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Portuguese names written by the first version of the mobile app.
        match s.trim().to_lowercase().as_str() {
            "confirmed" | "confirmada" => Ok(AppointmentStatus::Confirmed),
            "completed" | "realizada" => Ok(AppointmentStatus::Completed),
            "cancelled" | "cancelada" => Ok(AppointmentStatus::Cancelled),
            _ => Err(ParseAppointmentError {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// A booked consultation or exam.
///
/// `status == None` marks a record with no recorded outcome; it is listed
/// neither as upcoming nor as past.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    pub kind: AppointmentKind,
    /// Specialty for a consultation, exam type for an exam
    pub detail: String,
    pub date: Option<DateBound>,
    pub status: Option<AppointmentStatus>,
}

impl Appointment {
    /// Create a confirmed booking with a fresh ID.
    pub fn new(
        patient_name: String,
        kind: AppointmentKind,
        detail: String,
        date: DateBound,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_name,
            kind,
            detail,
            date: Some(date),
            status: Some(AppointmentStatus::Confirmed),
        }
    }

    pub fn is_upcoming(&self) -> bool {
        self.status.is_some_and(|s| s.is_upcoming())
    }

    pub fn is_past(&self) -> bool {
        self.status.is_some_and(|s| !s.is_upcoming())
    }
}
