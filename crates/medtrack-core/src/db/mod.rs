//! Database layer for medtrack.

mod appointments;
mod exams;
mod medications;
mod schema;

pub use schema::*;

use log::info;
use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

use crate::models::{Appointment, ExamRecord, MedicationRecord};
use crate::source::{RecordSource, RecordStore};

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Map a UNIQUE/CHECK failure to `Constraint`, pass everything else through.
fn constraint_error(e: rusqlite::Error, what: &str) -> DbError {
    match e.sqlite_error_code() {
        Some(rusqlite::ErrorCode::ConstraintViolation) => DbError::Constraint(what.to_string()),
        _ => DbError::Sqlite(e),
    }
}

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        info!("event=db_open module=db status=start mode=file");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        info!("event=db_open module=db status=start mode=memory");
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl RecordSource for Database {
    type Error = DbError;

    fn exams(&self) -> DbResult<Vec<ExamRecord>> {
        self.list_exams()
    }

    fn medications(&self) -> DbResult<Vec<MedicationRecord>> {
        self.list_medications()
    }

    fn appointments(&self) -> DbResult<Vec<Appointment>> {
        self.list_appointments()
    }
}

impl RecordStore for Database {
    fn add_exam(&mut self, exam: ExamRecord) -> DbResult<()> {
        self.insert_exam(&exam)
    }

    fn add_medication(&mut self, medication: MedicationRecord) -> DbResult<()> {
        self.insert_medication(&medication)
    }

    fn add_appointment(&mut self, appointment: Appointment) -> DbResult<()> {
        self.insert_appointment(&appointment)
    }

    fn save_exam(&mut self, exam: &ExamRecord) -> DbResult<bool> {
        self.update_exam(exam)
    }

    fn set_stock(&mut self, medication_id: &str, stock_count: u32) -> DbResult<bool> {
        self.update_stock(medication_id, stock_count)
    }
}
