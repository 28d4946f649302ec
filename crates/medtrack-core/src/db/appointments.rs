//! Appointment database operations.

use log::{info, warn};
use rusqlite::{params, Row};

use super::{constraint_error, Database, DbResult};
use crate::models::{Appointment, AppointmentKind, AppointmentStatus, DateBound};

const APPOINTMENT_COLUMNS: &str = "id, patient_name, kind, detail, appointment_date, status";

impl Database {
    /// Insert a new appointment.
    pub fn insert_appointment(&self, appt: &Appointment) -> DbResult<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO appointments (id, patient_name, kind, detail, appointment_date, status)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    appt.id,
                    appt.patient_name,
                    appt.kind.as_str(),
                    appt.detail,
                    appt.date.map(|d| d.to_iso()),
                    appt.status.map(|s| s.as_str()),
                ],
            )
            .map_err(|e| constraint_error(e, &format!("appointment {}", appt.id)))?;
        info!(
            "event=appointment_insert module=db id={} kind={}",
            appt.id, appt.kind
        );
        Ok(())
    }

    /// All appointments, newest first. Rows with an unknown kind are skipped.
    pub fn list_appointments(&self) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY seq DESC"
        ))?;
        let rows = stmt.query_map([], row_to_appointment)?;
        let mut appointments = Vec::new();
        for row in rows {
            appointments.extend(row?);
        }
        Ok(appointments)
    }
}

fn row_to_appointment(row: &Row<'_>) -> rusqlite::Result<Option<Appointment>> {
    let id: String = row.get(0)?;
    let raw_kind: String = row.get(2)?;
    let raw_date: Option<String> = row.get(4)?;
    let raw_status: Option<String> = row.get(5)?;

    let kind = match raw_kind.parse::<AppointmentKind>() {
        Ok(kind) => kind,
        Err(_) => {
            warn!(
                "event=appointment_bad_kind module=db id={} value={:?} action=skip",
                id, raw_kind
            );
            return Ok(None);
        }
    };
    let date = raw_date.and_then(|text| match DateBound::parse_iso(&text) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("event=appointment_bad_date module=db id={} value={:?}", id, text);
            None
        }
    });
    // An unknown status is treated like a missing one.
    let status = raw_status.and_then(|text| match text.parse::<AppointmentStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            warn!("event=appointment_bad_status module=db id={} value={:?}", id, text);
            None
        }
    });

    Ok(Some(Appointment {
        id,
        patient_name: row.get(1)?,
        kind,
        detail: row.get(3)?,
        date,
        status,
    }))
}
