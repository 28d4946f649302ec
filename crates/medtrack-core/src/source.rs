//! Providers of record lists.
//!
//! The filtering engine never loads or stores records itself. Screens pull
//! lists from a [`RecordSource`] and write changes back through a
//! [`RecordStore`]. Appointments booked by patients travel the same way.

use std::convert::Infallible;

use thiserror::Error;

use crate::models::{Appointment, ExamRecord, MedicationRecord};

/// Read access to exam, medication and appointment lists, newest first.
pub trait RecordSource {
    type Error: std::error::Error;

    fn exams(&self) -> Result<Vec<ExamRecord>, Self::Error>;

    fn medications(&self) -> Result<Vec<MedicationRecord>, Self::Error>;

    fn appointments(&self) -> Result<Vec<Appointment>, Self::Error>;
}

/// Write access for records created or changed by the app.
pub trait RecordStore: RecordSource {
    /// Add a new exam ahead of the existing ones.
    fn add_exam(&mut self, exam: ExamRecord) -> Result<(), Self::Error>;

    /// Add a new medication ahead of the existing ones.
    fn add_medication(&mut self, medication: MedicationRecord) -> Result<(), Self::Error>;

    /// Add a new appointment ahead of the existing ones.
    fn add_appointment(&mut self, appointment: Appointment) -> Result<(), Self::Error>;

    /// Replace a stored exam with the same ID. Returns false if there was none.
    fn save_exam(&mut self, exam: &ExamRecord) -> Result<bool, Self::Error>;

    /// Change a medication's stock count. Returns false if there was none.
    fn set_stock(&mut self, medication_id: &str, stock_count: u32) -> Result<bool, Self::Error>;
}

/// Errors from the in-memory store.
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Duplicate record ID: {0}")]
    DuplicateId(String),
}

/// Vec-backed store, used for seeded demo data and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecords {
    exams: Vec<ExamRecord>,
    medications: Vec<MedicationRecord>,
    appointments: Vec<Appointment>,
}

impl InMemoryRecords {
    pub fn new(exams: Vec<ExamRecord>, medications: Vec<MedicationRecord>) -> Self {
        Self {
            exams,
            medications,
            appointments: Vec::new(),
        }
    }

    pub fn with_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        self.appointments = appointments;
        self
    }
}

impl RecordSource for InMemoryRecords {
    type Error = MemoryError;

    fn exams(&self) -> Result<Vec<ExamRecord>, Self::Error> {
        Ok(self.exams.clone())
    }

    fn medications(&self) -> Result<Vec<MedicationRecord>, Self::Error> {
        Ok(self.medications.clone())
    }

    fn appointments(&self) -> Result<Vec<Appointment>, Self::Error> {
        Ok(self.appointments.clone())
    }
}

impl RecordStore for InMemoryRecords {
    fn add_exam(&mut self, exam: ExamRecord) -> Result<(), Self::Error> {
        if self.exams.iter().any(|e| e.id == exam.id) {
            return Err(MemoryError::DuplicateId(exam.id));
        }
        self.exams.insert(0, exam);
        Ok(())
    }

    fn add_medication(&mut self, medication: MedicationRecord) -> Result<(), Self::Error> {
        if self.medications.iter().any(|m| m.id == medication.id) {
            return Err(MemoryError::DuplicateId(medication.id));
        }
        self.medications.insert(0, medication);
        Ok(())
    }

    fn add_appointment(&mut self, appointment: Appointment) -> Result<(), Self::Error> {
        if self.appointments.iter().any(|a| a.id == appointment.id) {
            return Err(MemoryError::DuplicateId(appointment.id));
        }
        self.appointments.insert(0, appointment);
        Ok(())
    }

    fn save_exam(&mut self, exam: &ExamRecord) -> Result<bool, Self::Error> {
        match self.exams.iter_mut().find(|e| e.id == exam.id) {
            Some(slot) => {
                *slot = exam.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn set_stock(&mut self, medication_id: &str, stock_count: u32) -> Result<bool, Self::Error> {
        match self.medications.iter_mut().find(|m| m.id == medication_id) {
            Some(med) => {
                med.stock_count = stock_count;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// A fixed list, for sources that cannot fail.
#[derive(Debug, Clone, Default)]
pub struct StaticRecords {
    pub exams: Vec<ExamRecord>,
    pub medications: Vec<MedicationRecord>,
    pub appointments: Vec<Appointment>,
}

impl RecordSource for StaticRecords {
    type Error = Infallible;

    fn exams(&self) -> Result<Vec<ExamRecord>, Self::Error> {
        Ok(self.exams.clone())
    }

    fn medications(&self) -> Result<Vec<MedicationRecord>, Self::Error> {
        Ok(self.medications.clone())
    }

    fn appointments(&self) -> Result<Vec<Appointment>, Self::Error> {
        Ok(self.appointments.clone())
    }
}
