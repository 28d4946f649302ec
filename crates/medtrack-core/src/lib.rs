//! MedTrack Core Library
//!
//! Local-first core for the exam scheduling, appointment booking and
//! medication stock app.
//!
//! # Architecture
//!
//! ```text
//!   Calendar taps ──► RangeFilterEngine ──► DateRange ──► marked calendar cells
//!                             │
//!                        FilterState
//!              (range, status, search, scope)
//!                             │
//!   RecordSource ─────────────▼─────────────► visible exams / medications
//!   (SQLite, memory)
//!         ▲
//!         │ add / save
//!   Registration forms, status advance (admin only),
//!   appointment booking (any user, for themselves)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (DateBound, ExamRecord, MedicationRecord, etc.)
//! - [`engine`]: Day selection state machine and list filters
//! - [`source`]: Record provider traits and an in-memory store
//! - [`registration`]: Validated record creation from form input
//! - [`db`]: SQLite storage
//! - [`config`]: Session configuration

pub mod config;
pub mod db;
pub mod engine;
pub mod models;
pub mod registration;
pub mod source;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::Database;
pub use engine::{
    advance_status, compute_marked_days, filter_records, partition_appointments,
    search_medications, AppointmentLists, DayRole, EngineError, FilterState, RangeFilterEngine,
    SelectionOutcome, SelectionPolicy, SelectionState,
};
pub use models::{
    Appointment, AppointmentKind, AppointmentStatus, Availability, CurrentUser, DateBound,
    DateRange, ExamRecord, ExamStatus, MedicationRecord, StatusFilter, UserRole,
};
pub use source::{InMemoryRecords, RecordSource, RecordStore};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use registration::{NewAppointment, NewExam, NewMedication};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedTrackError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for MedTrackError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => MedTrackError::NotFound(what),
            other => MedTrackError::DatabaseError(other.to_string()),
        }
    }
}

impl From<EngineError> for MedTrackError {
    fn from(e: EngineError) -> Self {
        MedTrackError::InvalidInput(e.to_string())
    }
}

impl From<registration::RegistrationError> for MedTrackError {
    fn from(e: registration::RegistrationError) -> Self {
        MedTrackError::InvalidInput(e.to_string())
    }
}

impl From<models::ParseStatusError> for MedTrackError {
    fn from(e: models::ParseStatusError) -> Self {
        MedTrackError::InvalidInput(e.to_string())
    }
}

impl From<config::ConfigError> for MedTrackError {
    fn from(e: config::ConfigError) -> Self {
        MedTrackError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedTrackError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedTrackError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a session from a JSON [`AppConfig`] document.
#[uniffi::export]
pub fn open_tracker(config_json: String) -> Result<Arc<MedTrackCore>, MedTrackError> {
    let config = AppConfig::from_json_str(&config_json)?;
    let db = match &config.database_path {
        Some(path) => Database::open(path)?,
        None => Database::open_in_memory()?,
    };
    let engine =
        RangeFilterEngine::for_today(config.current_user).with_policy(config.selection_policy);
    Ok(Arc::new(MedTrackCore::new(db, engine)))
}

/// Open a session backed by an in-memory database (for testing).
#[uniffi::export]
pub fn open_tracker_in_memory(
    user_name: String,
    is_admin: bool,
) -> Result<Arc<MedTrackCore>, MedTrackError> {
    let role = if is_admin {
        UserRole::Admin
    } else {
        UserRole::Common
    };
    let db = Database::open_in_memory()?;
    let engine = RangeFilterEngine::for_today(CurrentUser::new(user_name, role));
    Ok(Arc::new(MedTrackCore::new(db, engine)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
#[derive(uniffi::Object)]
pub struct MedTrackCore {
    db: Arc<Mutex<Database>>,
    engine: Mutex<RangeFilterEngine>,
}

impl MedTrackCore {
    fn new(db: Database, engine: RangeFilterEngine) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            engine: Mutex::new(engine),
        }
    }

    fn my_appointments(&self) -> Result<AppointmentLists, MedTrackError> {
        let records = self.db.lock()?.appointments()?;
        let engine = self.engine.lock()?;
        Ok(engine.my_appointments(&records))
    }

    fn require_admin(&self, action: &str) -> Result<(), MedTrackError> {
        let engine = self.engine.lock()?;
        if engine.user().is_admin() {
            Ok(())
        } else {
            Err(MedTrackError::PermissionDenied(format!(
                "{} requires an administrator",
                action
            )))
        }
    }
}

#[uniffi::export]
impl MedTrackCore {
    // =========================================================================
    // Date Range Selection
    // =========================================================================

    /// Apply a tap on a calendar day (`YYYY-MM-DD`).
    pub fn select_day(&self, day: String) -> Result<FfiSelection, MedTrackError> {
        let mut engine = self.engine.lock()?;
        let outcome = engine.select_day(&day)?;
        Ok(outcome.into())
    }

    /// Calendar cells to highlight for the current range.
    pub fn marked_days(&self) -> Result<Vec<FfiMarkedDay>, MedTrackError> {
        let engine = self.engine.lock()?;
        Ok(engine
            .marked_days()
            .into_iter()
            .map(|(date, role)| FfiMarkedDay {
                date: date.to_iso(),
                role: role.as_str().to_string(),
                is_start: role.is_start(),
                is_end: role.is_end(),
            })
            .collect())
    }

    /// Header text for the selected period.
    pub fn period_label(&self) -> Result<String, MedTrackError> {
        let engine = self.engine.lock()?;
        Ok(engine.period_label())
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Set the status filter ("all", "to_do", "pending", "to_collect", "done").
    pub fn set_status_filter(&self, filter: String) -> Result<(), MedTrackError> {
        let filter: StatusFilter = filter.parse()?;
        let mut engine = self.engine.lock()?;
        engine.set_status_filter(filter);
        Ok(())
    }

    pub fn set_search_term(&self, term: String) -> Result<(), MedTrackError> {
        let mut engine = self.engine.lock()?;
        engine.set_search_term(term);
        Ok(())
    }

    pub fn set_scope_to_current_user(&self, scoped: bool) -> Result<(), MedTrackError> {
        let mut engine = self.engine.lock()?;
        engine.set_scope_to_current_user(scoped);
        Ok(())
    }

    /// Exams matching the current filters, newest first.
    pub fn visible_exams(&self) -> Result<Vec<FfiExamRecord>, MedTrackError> {
        let records = self.db.lock()?.exams()?;
        let engine = self.engine.lock()?;
        Ok(engine
            .visible_exams(&records)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Medications matching the current search term, newest first.
    pub fn visible_medications(&self) -> Result<Vec<FfiMedicationRecord>, MedTrackError> {
        let records = self.db.lock()?.medications()?;
        let engine = self.engine.lock()?;
        Ok(engine
            .visible_medications(&records)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    // =========================================================================
    // Appointments (the signed-in user's own)
    // =========================================================================

    /// Book a consultation or exam for the signed-in user.
    ///
    /// `kind` is `consultation` or `exam`; `detail` names the specialty or
    /// exam type.
    pub fn schedule_appointment(
        &self,
        kind: String,
        detail: String,
        date: String,
    ) -> Result<FfiAppointment, MedTrackError> {
        let patient_name = self.engine.lock()?.user().name.clone();
        let record = NewAppointment {
            patient_name,
            kind,
            detail,
            date,
        }
        .into_record()?;
        let mut db = self.db.lock()?;
        db.add_appointment(record.clone())?;
        Ok(record.into())
    }

    /// Confirmed bookings of the signed-in user, newest first.
    pub fn upcoming_appointments(&self) -> Result<Vec<FfiAppointment>, MedTrackError> {
        let lists = self.my_appointments()?;
        Ok(lists.upcoming.into_iter().map(Into::into).collect())
    }

    /// Completed or cancelled bookings of the signed-in user, newest first.
    pub fn past_appointments(&self) -> Result<Vec<FfiAppointment>, MedTrackError> {
        let lists = self.my_appointments()?;
        Ok(lists.past.into_iter().map(Into::into).collect())
    }

    // =========================================================================
    // Record Operations (administrator only)
    // =========================================================================

    /// Register a new exam. `date` accepts `DD/MM/YYYY` or `YYYY-MM-DD`.
    pub fn register_exam(
        &self,
        patient_name: String,
        kind: String,
        specialty: String,
        date: String,
    ) -> Result<FfiExamRecord, MedTrackError> {
        self.require_admin("registering an exam")?;
        let record = NewExam {
            patient_name,
            kind,
            specialty,
            date,
        }
        .into_record()?;
        let mut db = self.db.lock()?;
        db.add_exam(record.clone())?;
        Ok(record.into())
    }

    /// Register a new medication.
    pub fn register_medication(
        &self,
        name: String,
        dosage: String,
        description: String,
        stock: String,
        expected_arrival: String,
    ) -> Result<FfiMedicationRecord, MedTrackError> {
        self.require_admin("registering a medication")?;
        let record = NewMedication {
            name,
            dosage,
            description,
            stock,
            expected_arrival,
        }
        .into_record()?;
        let mut db = self.db.lock()?;
        db.add_medication(record.clone())?;
        Ok(record.into())
    }

    /// Move an exam one step along the status cycle.
    pub fn advance_exam_status(&self, exam_id: String) -> Result<FfiExamRecord, MedTrackError> {
        self.require_admin("changing an exam status")?;
        let db = self.db.lock()?;
        let advanced = db.advance_exam_status(&exam_id)?;
        Ok(advanced.into())
    }

    /// Replace a medication's stock count.
    pub fn set_medication_stock(
        &self,
        medication_id: String,
        stock_count: u32,
    ) -> Result<(), MedTrackError> {
        self.require_admin("changing stock")?;
        let mut db = self.db.lock()?;
        if !db.set_stock(&medication_id, stock_count)? {
            return Err(MedTrackError::NotFound(format!(
                "medication {}",
                medication_id
            )));
        }
        Ok(())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe selection result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSelection {
    pub start: String,
    pub end: Option<String>,
    pub complete: bool,
    pub collapse_calendar: bool,
}

impl From<SelectionOutcome> for FfiSelection {
    fn from(outcome: SelectionOutcome) -> Self {
        Self {
            start: outcome.range.start().to_iso(),
            end: outcome.range.end().map(|d| d.to_iso()),
            complete: outcome.range.is_complete(),
            collapse_calendar: outcome.collapse_calendar,
        }
    }
}

/// FFI-safe highlighted calendar cell.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMarkedDay {
    pub date: String,
    pub role: String,
    pub is_start: bool,
    pub is_end: bool,
}

/// FFI-safe exam record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiExamRecord {
    pub id: String,
    pub patient_name: String,
    pub date: Option<String>,
    /// `DD/MM/YYYY` for display
    pub date_label: String,
    pub kind: String,
    pub specialty: String,
    pub status: String,
}

impl From<ExamRecord> for FfiExamRecord {
    fn from(exam: ExamRecord) -> Self {
        Self {
            id: exam.id,
            patient_name: exam.patient_name,
            date: exam.date.map(|d| d.to_iso()),
            date_label: exam.date.map(|d| d.to_display()).unwrap_or_default(),
            kind: exam.kind,
            specialty: exam.specialty,
            status: exam.status.as_str().to_string(),
        }
    }
}

/// FFI-safe medication record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicationRecord {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub description: String,
    pub stock_count: u32,
    pub expected_arrival: Option<String>,
    pub arrival_label: String,
    pub availability: String,
}

impl From<MedicationRecord> for FfiMedicationRecord {
    fn from(med: MedicationRecord) -> Self {
        let availability = med.availability().label().to_string();
        let arrival_label = med.arrival_label();
        Self {
            id: med.id,
            name: med.name,
            dosage: med.dosage,
            description: med.description,
            stock_count: med.stock_count,
            expected_arrival: med.expected_arrival.map(|d| d.to_iso()),
            arrival_label,
            availability,
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub patient_name: String,
    pub kind: String,
    /// "Consultation" or "Exam"
    pub kind_label: String,
    pub detail: String,
    pub date: Option<String>,
    pub date_label: String,
    pub status: Option<String>,
}

impl From<Appointment> for FfiAppointment {
    fn from(appt: Appointment) -> Self {
        Self {
            id: appt.id,
            patient_name: appt.patient_name,
            kind: appt.kind.as_str().to_string(),
            kind_label: appt.kind.label().to_string(),
            detail: appt.detail,
            date: appt.date.map(|d| d.to_iso()),
            date_label: appt.date.map(|d| d.to_display()).unwrap_or_default(),
            status: appt.status.map(|s| s.as_str().to_string()),
        }
    }
}
