//! Medication database operations.

use log::{info, warn};
use rusqlite::{params, OptionalExtension, Row};

use super::{constraint_error, Database, DbResult};
use crate::models::{DateBound, MedicationRecord};

const MEDICATION_COLUMNS: &str = "id, name, dosage, description, stock_count, expected_arrival";

impl Database {
    /// Insert a new medication.
    pub fn insert_medication(&self, med: &MedicationRecord) -> DbResult<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO medications (id, name, dosage, description, stock_count, expected_arrival)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    med.id,
                    med.name,
                    med.dosage,
                    med.description,
                    med.stock_count,
                    med.expected_arrival.map(|d| d.to_iso()),
                ],
            )
            .map_err(|e| constraint_error(e, &format!("medication {}", med.id)))?;
        info!("event=medication_insert module=db id={}", med.id);
        Ok(())
    }

    /// Set the stock count for a medication.
    pub fn update_stock(&self, id: &str, stock_count: u32) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medications SET
                stock_count = ?2,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![id, stock_count],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a medication by ID.
    pub fn get_medication(&self, id: &str) -> DbResult<Option<MedicationRecord>> {
        self.conn
            .query_row(
                &format!("SELECT {MEDICATION_COLUMNS} FROM medications WHERE id = ?"),
                [id],
                row_to_medication,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All medications, newest first.
    pub fn list_medications(&self) -> DbResult<Vec<MedicationRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {MEDICATION_COLUMNS} FROM medications ORDER BY seq DESC"
        ))?;
        let rows = stmt.query_map([], row_to_medication)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn row_to_medication(row: &Row<'_>) -> rusqlite::Result<MedicationRecord> {
    let id: String = row.get(0)?;
    let raw_arrival: Option<String> = row.get(5)?;
    let expected_arrival = raw_arrival.and_then(|text| match DateBound::parse_iso(&text) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("event=medication_bad_date module=db id={} value={:?}", id, text);
            None
        }
    });

    Ok(MedicationRecord {
        id,
        name: row.get(1)?,
        dosage: row.get(2)?,
        description: row.get(3)?,
        stock_count: row.get(4)?,
        expected_arrival,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Availability;

    #[test]
    fn test_insert_and_get_medication() {
        let db = Database::open_in_memory().unwrap();
        let mut med = MedicationRecord::new("Dipirona".into(), "1g".into(), 0);
        med.description = "Analgésico e Antitérmico.".into();
        med.expected_arrival = DateBound::from_ymd(2025, 10, 30);
        db.insert_medication(&med).unwrap();

        let loaded = db.get_medication(&med.id).unwrap().unwrap();
        assert_eq!(loaded, med);
        assert_eq!(loaded.availability(), Availability::Unavailable);
    }

    #[test]
    fn test_update_stock_changes_availability() {
        let db = Database::open_in_memory().unwrap();
        let med = MedicationRecord::new("Losartana".into(), "50mg".into(), 120);
        db.insert_medication(&med).unwrap();

        assert!(db.update_stock(&med.id, 19).unwrap());
        let loaded = db.get_medication(&med.id).unwrap().unwrap();
        assert_eq!(loaded.availability(), Availability::LowStock);

        assert!(!db.update_stock("missing", 1).unwrap());
    }

    #[test]
    fn test_list_medications_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let a = MedicationRecord::new("Ibuprofeno".into(), "400mg".into(), 50);
        let b = MedicationRecord::new("Amoxicilina".into(), "500mg".into(), 15);
        db.insert_medication(&a).unwrap();
        db.insert_medication(&b).unwrap();

        let names: Vec<String> = db
            .list_medications()
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Amoxicilina", "Ibuprofeno"]);
    }
}
