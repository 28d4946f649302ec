//! Date-range selection and list filtering for the exam and medication screens,
//! plus the upcoming/past split of the appointments screen.
//!
//! Pipeline: day taps → [`DateRange`] → marked calendar cells + visible records
//!
//! The engine owns a single [`FilterState`] and never stores records. Record
//! lists come from a [`RecordSource`](crate::source::RecordSource) and are
//! handed in on every call.

mod filter;
mod marking;
mod selection;

pub use filter::*;
pub use marking::*;
pub use selection::*;

use std::collections::BTreeMap;

use log::debug;
use thiserror::Error;

use crate::models::{
    Appointment, CurrentUser, DateBound, DateParseError, DateRange, ExamRecord, MedicationRecord,
    StatusFilter,
};

/// Engine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl From<DateParseError> for EngineError {
    fn from(e: DateParseError) -> Self {
        EngineError::InvalidDate(e.input)
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Everything that decides which records are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub range: DateRange,
    pub status_filter: StatusFilter,
    pub search_term: String,
    pub scope_to_current_user: bool,
}

impl FilterState {
    /// Today only, every status, no search.
    pub fn starting_on(today: DateBound) -> Self {
        Self {
            range: DateRange::single(today),
            status_filter: StatusFilter::All,
            search_term: String::new(),
            scope_to_current_user: false,
        }
    }
}

/// Filter state for one screen plus the user it is shown to.
#[derive(Debug, Clone)]
pub struct RangeFilterEngine {
    state: FilterState,
    user: CurrentUser,
    policy: SelectionPolicy,
}

impl RangeFilterEngine {
    /// Create an engine whose range starts as the single day `today`.
    pub fn new(user: CurrentUser, today: DateBound) -> Self {
        let mut state = FilterState::starting_on(today);
        state.scope_to_current_user = user.scoped_by_default();
        Self {
            state,
            user,
            policy: SelectionPolicy::default(),
        }
    }

    /// Create an engine starting on the local current date.
    pub fn for_today(user: CurrentUser) -> Self {
        Self::new(user, DateBound::today())
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn range(&self) -> DateRange {
        self.state.range
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn selection_state(&self) -> SelectionState {
        SelectionState::of(&self.state.range)
    }

    /// Apply a tap on a calendar day given as `YYYY-MM-DD`.
    ///
    /// An unreadable day is rejected without touching the current range.
    pub fn select_day(&mut self, day: &str) -> EngineResult<SelectionOutcome> {
        let day = DateBound::parse_iso(day)?;
        Ok(self.select_date(day))
    }

    /// Apply a tap on an already-parsed day.
    pub fn select_date(&mut self, day: DateBound) -> SelectionOutcome {
        let outcome = next_range(self.state.range, day, self.policy);
        debug!(
            "event=select_day module=engine day={} start={} end={} complete={}",
            day,
            outcome.range.start(),
            outcome
                .range
                .end()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "none".to_string()),
            outcome.range.is_complete()
        );
        self.state.range = outcome.range;
        outcome
    }

    /// Highlight roles for the current range.
    pub fn marked_days(&self) -> BTreeMap<DateBound, DayRole> {
        compute_marked_days(&self.state.range)
    }

    pub fn period_label(&self) -> String {
        period_label(&self.state.range)
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.state.status_filter = filter;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
    }

    pub fn set_scope_to_current_user(&mut self, scoped: bool) {
        self.state.scope_to_current_user = scoped;
    }

    /// Exams visible under the current filter state.
    pub fn visible_exams(&self, records: &[ExamRecord]) -> Vec<ExamRecord> {
        filter_records(records, &self.state, &self.user.name)
    }

    /// Medications matching the current search term.
    pub fn visible_medications(&self, records: &[MedicationRecord]) -> Vec<MedicationRecord> {
        search_medications(records, &self.state.search_term)
    }

    /// The engine user's own appointments, split into upcoming and past.
    pub fn my_appointments(&self, records: &[Appointment]) -> AppointmentLists {
        partition_appointments(records, &self.user.name)
    }
}
