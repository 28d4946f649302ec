//! Exam database operations.

use log::{info, warn};
use rusqlite::{params, OptionalExtension, Row};

use super::{constraint_error, Database, DbError, DbResult};
use crate::models::{DateBound, ExamRecord, ExamStatus};

const EXAM_COLUMNS: &str = "id, patient_name, exam_date, kind, specialty, status";

impl Database {
    /// Insert a new exam.
    pub fn insert_exam(&self, exam: &ExamRecord) -> DbResult<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO exams (id, patient_name, exam_date, kind, specialty, status)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    exam.id,
                    exam.patient_name,
                    exam.date.map(|d| d.to_iso()),
                    exam.kind,
                    exam.specialty,
                    exam.status.as_str(),
                ],
            )
            .map_err(|e| constraint_error(e, &format!("exam {}", exam.id)))?;
        info!("event=exam_insert module=db id={}", exam.id);
        Ok(())
    }

    /// Update an existing exam.
    pub fn update_exam(&self, exam: &ExamRecord) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE exams SET
                patient_name = ?2,
                exam_date = ?3,
                kind = ?4,
                specialty = ?5,
                status = ?6,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                exam.id,
                exam.patient_name,
                exam.date.map(|d| d.to_iso()),
                exam.kind,
                exam.specialty,
                exam.status.as_str(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get an exam by ID. A row with an unknown status reads as missing.
    pub fn get_exam(&self, id: &str) -> DbResult<Option<ExamRecord>> {
        let exam = self
            .conn
            .query_row(
                &format!("SELECT {EXAM_COLUMNS} FROM exams WHERE id = ?"),
                [id],
                row_to_exam,
            )
            .optional()?;
        Ok(exam.flatten())
    }

    /// All exams, newest first. Rows with an unknown status are skipped.
    pub fn list_exams(&self) -> DbResult<Vec<ExamRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {EXAM_COLUMNS} FROM exams ORDER BY seq DESC"))?;
        let rows = stmt.query_map([], row_to_exam)?;
        let mut exams = Vec::new();
        for row in rows {
            exams.extend(row?);
        }
        Ok(exams)
    }

    /// Move a stored exam one step along the status cycle and save it.
    pub fn advance_exam_status(&self, id: &str) -> DbResult<ExamRecord> {
        let exam = self
            .get_exam(id)?
            .ok_or_else(|| DbError::NotFound(format!("exam {id}")))?;
        let advanced = exam.advanced();
        self.update_exam(&advanced)?;
        info!(
            "event=exam_advance module=db id={} from={} to={}",
            id, exam.status, advanced.status
        );
        Ok(advanced)
    }
}

/// `Ok(None)` when the stored status is not one of the four known names.
fn row_to_exam(row: &Row<'_>) -> rusqlite::Result<Option<ExamRecord>> {
    let id: String = row.get(0)?;
    let raw_date: Option<String> = row.get(2)?;
    let raw_status: String = row.get(5)?;

    // An unreadable date keeps the record listed but out of every date filter.
    let date = raw_date.and_then(|text| match DateBound::parse_iso(&text) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("event=exam_bad_date module=db id={} value={:?}", id, text);
            None
        }
    });
    let status = match raw_status.parse::<ExamStatus>() {
        Ok(status) => status,
        Err(_) => {
            warn!(
                "event=exam_bad_status module=db id={} value={:?} action=skip",
                id, raw_status
            );
            return Ok(None);
        }
    };

    Ok(Some(ExamRecord {
        id,
        patient_name: row.get(1)?,
        date,
        kind: row.get(3)?,
        specialty: row.get(4)?,
        status,
    }))
}
