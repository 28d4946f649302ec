//! List predicates for the exam, medication and appointment screens.
//!
//! All functions are total and derive their output from their inputs on
//! every call; nothing is cached between calls.

use crate::models::{Appointment, DateRange, ExamRecord, MedicationRecord};

use super::FilterState;

/// Visible exams for a filter state.
///
/// Applied in order: patient scope, status, then the inclusive date range.
/// Output keeps input order. Records without a date never match.
pub fn filter_records(
    records: &[ExamRecord],
    state: &FilterState,
    current_user: &str,
) -> Vec<ExamRecord> {
    records
        .iter()
        .filter(|exam| !state.scope_to_current_user || exam.patient_name == current_user)
        .filter(|exam| state.status_filter.matches(exam.status))
        .filter(|exam| in_range(exam, &state.range))
        .cloned()
        .collect()
}

fn in_range(exam: &ExamRecord, range: &DateRange) -> bool {
    exam.date.is_some_and(|date| range.contains(date))
}

/// Case-insensitive substring search over name, dosage and description.
///
/// An empty term returns every record in order. Whitespace is part of the
/// term like any other character.
pub fn search_medications(records: &[MedicationRecord], term: &str) -> Vec<MedicationRecord> {
    if term.is_empty() {
        return records.to_vec();
    }
    let needle = term.to_lowercase();

    records
        .iter()
        .filter(|med| {
            [&med.name, &med.dosage, &med.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// One patient's bookings, split the way the appointments screen shows them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentLists {
    /// Confirmed bookings
    pub upcoming: Vec<Appointment>,
    /// Completed or cancelled bookings
    pub past: Vec<Appointment>,
}

/// Split a patient's appointments into upcoming and past, keeping input order.
///
/// Other patients' bookings and bookings without a status are left out.
pub fn partition_appointments(records: &[Appointment], patient_name: &str) -> AppointmentLists {
    let mut lists = AppointmentLists::default();
    for appt in records.iter().filter(|a| a.patient_name == patient_name) {
        if appt.is_upcoming() {
            lists.upcoming.push(appt.clone());
        } else if appt.is_past() {
            lists.past.push(appt.clone());
        }
    }
    lists
}

/// New record with the status moved one step along the cycle.
///
/// Persisting the result is up to the caller.
pub fn advance_status(record: &ExamRecord) -> ExamRecord {
    record.advanced()
}

/// Header text for the selected period.
pub fn period_label(range: &DateRange) -> String {
    match range.end() {
        Some(end) if end != range.start() => {
            format!("{} - {}", range.start().to_display(), end.to_display())
        }
        _ => range.start().to_display(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentKind, AppointmentStatus, DateBound, ExamStatus, StatusFilter};

    fn d(m: u32, day: u32) -> DateBound {
        DateBound::from_ymd(2025, m, day).unwrap()
    }

    fn exam(id: &str, patient: &str, date: Option<DateBound>, status: ExamStatus) -> ExamRecord {
        ExamRecord {
            id: id.into(),
            patient_name: patient.into(),
            date,
            kind: "Consulta".into(),
            specialty: "Cardiologia".into(),
            status,
        }
    }

    fn january() -> DateRange {
        DateRange::new(d(1, 1), Some(d(1, 31))).unwrap()
    }

    fn state(range: DateRange) -> FilterState {
        FilterState {
            range,
            status_filter: StatusFilter::All,
            search_term: String::new(),
            scope_to_current_user: false,
        }
    }

    #[test]
    fn test_status_filter_keeps_order() {
        let records = vec![
            exam("1", "Ana", Some(d(1, 5)), ExamStatus::ToDo),
            exam("2", "Ana", Some(d(1, 6)), ExamStatus::Pending),
            exam("3", "Ana", Some(d(1, 7)), ExamStatus::Pending),
            exam("4", "Ana", Some(d(1, 8)), ExamStatus::Done),
        ];
        let mut filter = state(january());
        filter.status_filter = StatusFilter::Only(ExamStatus::Pending);

        let ids: Vec<String> = filter_records(&records, &filter, "Ana")
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let records = vec![
            exam("in", "Ana", Some(d(1, 31)), ExamStatus::ToDo),
            exam("out", "Ana", Some(d(2, 1)), ExamStatus::ToDo),
            exam("first", "Ana", Some(d(1, 1)), ExamStatus::ToDo),
        ];
        let ids: Vec<String> = filter_records(&records, &state(january()), "Ana")
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["in", "first"]);
    }

    #[test]
    fn test_open_range_matches_start_day() {
        let records = vec![
            exam("a", "Ana", Some(d(1, 10)), ExamStatus::ToDo),
            exam("b", "Ana", Some(d(1, 11)), ExamStatus::ToDo),
        ];
        let result = filter_records(&records, &state(DateRange::open(d(1, 10))), "Ana");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn test_missing_date_is_excluded() {
        let records = vec![
            exam("nodate", "Ana", None, ExamStatus::ToDo),
            exam("ok", "Ana", Some(d(1, 2)), ExamStatus::ToDo),
        ];
        let result = filter_records(&records, &state(january()), "Ana");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "ok");
    }

    #[test]
    fn test_scope_to_current_user() {
        let records = vec![
            exam("1", "João Magne", Some(d(1, 2)), ExamStatus::ToDo),
            exam("2", "Maria Silva", Some(d(1, 2)), ExamStatus::ToDo),
        ];
        let mut filter = state(january());
        assert_eq!(filter_records(&records, &filter, "João Magne").len(), 2);

        filter.scope_to_current_user = true;
        let result = filter_records(&records, &filter, "João Magne");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].patient_name, "João Magne");
    }

    fn med(name: &str, dosage: &str, description: &str) -> MedicationRecord {
        let mut record = MedicationRecord::new(name.into(), dosage.into(), 10);
        record.description = description.into();
        record
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = vec![
            med("Ibuprofeno", "400mg", "Analgésico e Anti-inflamatório."),
            med("Amoxicilina", "500mg", "Antibiótico de amplo espectro."),
        ];
        let result = search_medications(&records, "IBU");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Ibuprofeno");
    }

    #[test]
    fn test_search_covers_dosage_and_description() {
        let records = vec![
            med("Ibuprofeno", "400mg", "Analgésico e Anti-inflamatório."),
            med("Losartana", "50mg", "Para controle de hipertensão."),
            med("Dipirona", "1g", "Analgésico e Antitérmico."),
        ];
        assert_eq!(search_medications(&records, "50mg").len(), 1);
        assert_eq!(search_medications(&records, "analgésico").len(), 2);
        assert!(search_medications(&records, "xyz").is_empty());
    }

    #[test]
    fn test_empty_search_returns_all() {
        let records = vec![med("B", "1g", ""), med("A", "2g", "")];
        assert_eq!(search_medications(&records, ""), records);
    }

    #[test]
    fn test_whitespace_is_matched_literally() {
        let records = vec![
            med("Ibuprofeno", "400mg", "Anti-inflamatório."),
            med("Dipirona", "1g", ""),
        ];
        assert!(search_medications(&records, "ibu ").is_empty());

        let spaced = search_medications(&records, " ");
        assert_eq!(spaced.len(), 1);
        assert_eq!(spaced[0].name, "Ibuprofeno");
    }

    #[test]
    fn test_advance_status_wraps() {
        let done = exam("1", "Ana", Some(d(1, 2)), ExamStatus::Done);
        assert_eq!(advance_status(&done).status, ExamStatus::ToDo);
    }

    #[test]
    fn test_period_label() {
        assert_eq!(period_label(&DateRange::single(d(1, 10))), "10/01/2025");
        assert_eq!(period_label(&DateRange::open(d(1, 10))), "10/01/2025");
        assert_eq!(period_label(&january()), "01/01/2025 - 31/01/2025");
    }

    fn booking(id: &str, patient: &str, status: Option<AppointmentStatus>) -> Appointment {
        let mut appt = Appointment::new(
            patient.into(),
            AppointmentKind::Consultation,
            "Neurologia".into(),
            d(2, 3),
        );
        appt.id = id.into();
        appt.status = status;
        appt
    }

    #[test]
    fn test_partition_appointments() {
        let records = vec![
            booking("1", "Ana", Some(AppointmentStatus::Confirmed)),
            booking("2", "Ana", Some(AppointmentStatus::Cancelled)),
            booking("3", "Bia", Some(AppointmentStatus::Confirmed)),
            booking("4", "Ana", None),
            booking("5", "Ana", Some(AppointmentStatus::Completed)),
            booking("6", "Ana", Some(AppointmentStatus::Confirmed)),
        ];
        let lists = partition_appointments(&records, "Ana");
        let ids = |list: &[Appointment]| list.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&lists.upcoming), vec!["1", "6"]);
        assert_eq!(ids(&lists.past), vec!["2", "5"]);

        assert_eq!(partition_appointments(&records, "Caio"), AppointmentLists::default());
    }
}
