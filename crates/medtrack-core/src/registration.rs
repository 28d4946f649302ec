//! Validated creation of exam, medication and appointment records from form input.

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Appointment, AppointmentKind, DateBound, ExamRecord, MedicationRecord};

/// Form validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date for {field}: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Invalid stock count: {0}")]
    InvalidStock(String),

    #[error("Invalid appointment kind: {0}")]
    InvalidKind(String),
}

pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Raw input of the "register exam" form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewExam {
    pub patient_name: String,
    pub kind: String,
    pub specialty: String,
    /// `DD/MM/YYYY` or `YYYY-MM-DD`
    pub date: String,
}

impl NewExam {
    /// Validate the form and build a record in the `to_do` state.
    pub fn into_record(self) -> RegistrationResult<ExamRecord> {
        let specialty = required("specialty", self.specialty)?;
        let patient_name = required("patient_name", self.patient_name)?;
        let date_text = required("date", self.date)?;
        let date = DateBound::parse_any(&date_text).map_err(|_| RegistrationError::InvalidDate {
            field: "date",
            value: date_text.clone(),
        })?;

        let record = ExamRecord::new(patient_name, date, self.kind.trim().to_string(), specialty);
        info!(
            "event=register_exam module=registration id={} date={}",
            record.id, date
        );
        Ok(record)
    }
}

/// Raw input of the "register medication" form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewMedication {
    pub name: String,
    pub dosage: String,
    pub description: String,
    /// Units on hand, as typed
    pub stock: String,
    /// Optional `YYYY-MM-DD`; blank means none scheduled
    pub expected_arrival: String,
}

impl NewMedication {
    pub fn into_record(self) -> RegistrationResult<MedicationRecord> {
        let name = required("name", self.name)?;
        let dosage = required("dosage", self.dosage)?;
        let stock_text = required("stock", self.stock)?;
        let stock_count = stock_text
            .parse::<u32>()
            .map_err(|_| RegistrationError::InvalidStock(stock_text.clone()))?;

        let arrival_text = self.expected_arrival.trim();
        let expected_arrival = if arrival_text.is_empty() {
            None
        } else {
            Some(DateBound::parse_any(arrival_text).map_err(|_| {
                RegistrationError::InvalidDate {
                    field: "expected_arrival",
                    value: arrival_text.to_string(),
                }
            })?)
        };

        let mut record = MedicationRecord::new(name, dosage, stock_count);
        record.description = self.description.trim().to_string();
        record.expected_arrival = expected_arrival;
        info!(
            "event=register_medication module=registration id={} stock={}",
            record.id, stock_count
        );
        Ok(record)
    }
}

/// Raw input of the "schedule appointment" form.
///
/// The patient is always the signed-in user; the caller fills it in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub patient_name: String,
    /// `consultation` or `exam` (`consulta` / `exame` also accepted)
    pub kind: String,
    /// Specialty for a consultation, exam type for an exam
    pub detail: String,
    /// `DD/MM/YYYY` or `YYYY-MM-DD`, optionally followed by a time
    pub date: String,
}

impl NewAppointment {
    /// Validate the form and build a confirmed booking.
    pub fn into_record(self) -> RegistrationResult<Appointment> {
        let kind = self
            .kind
            .parse::<AppointmentKind>()
            .map_err(|_| RegistrationError::InvalidKind(self.kind.clone()))?;
        let detail = required("detail", self.detail)?;
        let patient_name = required("patient_name", self.patient_name)?;
        let date_text = required("date", self.date)?;
        let date = DateBound::parse_any(&date_text).map_err(|_| RegistrationError::InvalidDate {
            field: "date",
            value: date_text.clone(),
        })?;

        let record = Appointment::new(patient_name, kind, detail, date);
        info!(
            "event=schedule_appointment module=registration id={} kind={} date={}",
            record.id, kind, date
        );
        Ok(record)
    }
}

fn required(field: &'static str, value: String) -> RegistrationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentStatus, Availability, ExamStatus};

    fn exam_form() -> NewExam {
        NewExam {
            patient_name: "Maria Silva".into(),
            kind: "Ultrassom".into(),
            specialty: "Cardiologia".into(),
            date: "28/10/2025".into(),
        }
    }

    #[test]
    fn test_exam_from_display_date() {
        let record = exam_form().into_record().unwrap();
        assert_eq!(record.date, DateBound::from_ymd(2025, 10, 28));
        assert_eq!(record.status, ExamStatus::ToDo);
        assert_eq!(record.specialty, "Cardiologia");
    }

    #[test]
    fn test_exam_from_iso_date() {
        let mut form = exam_form();
        form.date = "2025-10-28".into();
        assert_eq!(form.into_record().unwrap().date, DateBound::from_ymd(2025, 10, 28));
    }

    #[test]
    fn test_exam_requires_fields() {
        let mut form = exam_form();
        form.patient_name = "  ".into();
        assert_eq!(
            form.into_record().unwrap_err(),
            RegistrationError::MissingField("patient_name")
        );

        let mut form = exam_form();
        form.date = "28-10".into();
        assert!(matches!(
            form.into_record(),
            Err(RegistrationError::InvalidDate { field: "date", .. })
        ));
    }

    fn med_form() -> NewMedication {
        NewMedication {
            name: "Amoxicilina".into(),
            dosage: "500mg".into(),
            description: "Antibiótico de amplo espectro.".into(),
            stock: "15".into(),
            expected_arrival: "2025-11-15".into(),
        }
    }

    #[test]
    fn test_medication_form() {
        let record = med_form().into_record().unwrap();
        assert_eq!(record.stock_count, 15);
        assert_eq!(record.availability(), Availability::LowStock);
        assert_eq!(record.expected_arrival, DateBound::from_ymd(2025, 11, 15));
    }

    #[test]
    fn test_blank_arrival_is_none() {
        let mut form = med_form();
        form.expected_arrival = String::new();
        assert_eq!(form.into_record().unwrap().expected_arrival, None);
    }

    #[test]
    fn test_stock_must_be_non_negative_integer() {
        for bad in ["-1", "abc", "1.5"] {
            let mut form = med_form();
            form.stock = bad.into();
            assert_eq!(
                form.into_record().unwrap_err(),
                RegistrationError::InvalidStock(bad.into())
            );
        }

        let mut form = med_form();
        form.stock = String::new();
        assert_eq!(form.into_record().unwrap_err(), RegistrationError::MissingField("stock"));
    }

    fn appointment_form() -> NewAppointment {
        NewAppointment {
            patient_name: "Ana Costa".into(),
            kind: "consulta".into(),
            detail: "Dermatologia".into(),
            date: "2025-11-03T14:30:00.000Z".into(),
        }
    }

    #[test]
    fn test_appointment_form() {
        let record = appointment_form().into_record().unwrap();
        assert_eq!(record.kind, AppointmentKind::Consultation);
        assert_eq!(record.date, DateBound::from_ymd(2025, 11, 3));
        assert_eq!(record.status, Some(AppointmentStatus::Confirmed));
    }

    #[test]
    fn test_appointment_requires_detail_and_kind() {
        let mut form = appointment_form();
        form.detail = " ".into();
        assert_eq!(form.into_record().unwrap_err(), RegistrationError::MissingField("detail"));

        let mut form = appointment_form();
        form.kind = "cirurgia".into();
        assert_eq!(
            form.into_record().unwrap_err(),
            RegistrationError::InvalidKind("cirurgia".into())
        );
    }
}
