//! SQLite schema definitions.

/// Complete database schema.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Exams
-- ============================================================================

-- `seq` keeps insertion order; lists are returned newest first.
CREATE TABLE IF NOT EXISTS exams (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    patient_name TEXT NOT NULL,
    exam_date TEXT,                    -- YYYY-MM-DD, NULL when unknown
    kind TEXT NOT NULL DEFAULT '',
    specialty TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'to_do'
        CHECK (status IN ('to_do', 'pending', 'to_collect', 'done')),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_exams_patient ON exams(patient_name);
CREATE INDEX IF NOT EXISTS idx_exams_date ON exams(exam_date);

-- ============================================================================
-- Medications
-- ============================================================================

-- Availability is derived from stock_count on read and has no column.
CREATE TABLE IF NOT EXISTS medications (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    dosage TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    stock_count INTEGER NOT NULL DEFAULT 0 CHECK (stock_count >= 0),
    expected_arrival TEXT,             -- YYYY-MM-DD
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_medications_name ON medications(name);

-- ============================================================================
-- Appointments
-- ============================================================================

-- Booked by patients for themselves. A NULL status is neither upcoming nor past.
CREATE TABLE IF NOT EXISTS appointments (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    patient_name TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('consultation', 'exam')),
    detail TEXT NOT NULL,
    appointment_date TEXT,             -- YYYY-MM-DD
    status TEXT DEFAULT 'confirmed'
        CHECK (status IS NULL OR status IN ('confirmed', 'completed', 'cancelled')),
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_name);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_status_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO exams (id, patient_name, status) VALUES ('e1', 'Ana', 'cancelled')",
            [],
        );
        assert!(result.is_err());

        let result = conn.execute(
            "INSERT INTO exams (id, patient_name, status) VALUES ('e1', 'Ana', 'pending')",
            [],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_negative_stock_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO medications (id, name, dosage, stock_count) VALUES ('m1', 'Dipirona', '1g', -1)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_appointment_kind_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO appointments (id, patient_name, kind, detail) VALUES ('a1', 'Ana', 'surgery', 'x')",
            [],
        );
        assert!(result.is_err());

        let result = conn.execute(
            "INSERT INTO appointments (id, patient_name, kind, detail, status) VALUES ('a1', 'Ana', 'exam', 'Raio-X', NULL)",
            [],
        );
        assert!(result.is_ok());
    }
}
