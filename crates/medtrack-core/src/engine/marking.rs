//! Per-day highlight roles for rendering a selected range on the calendar.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{DateBound, DateRange};

/// How a calendar cell is drawn within the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayRole {
    Start,
    End,
    /// Both the first and the last day of the selection
    Single,
    Between,
}

impl DayRole {
    pub fn is_start(&self) -> bool {
        matches!(self, DayRole::Start | DayRole::Single)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, DayRole::End | DayRole::Single)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayRole::Start => "start",
            DayRole::End => "end",
            DayRole::Single => "single",
            DayRole::Between => "between",
        }
    }
}

/// Calendar cells covered by a range, keyed by day.
///
/// Always built from scratch so a new selection never inherits cells from
/// the previous one.
pub fn compute_marked_days(range: &DateRange) -> BTreeMap<DateBound, DayRole> {
    let mut marked = BTreeMap::new();
    let start = range.start();

    let end = match range.end() {
        Some(end) if end > start => end,
        _ => {
            marked.insert(start, DayRole::Single);
            return marked;
        }
    };

    marked.insert(start, DayRole::Start);
    let mut current = start.next_day();
    while let Some(day) = current {
        if day >= end {
            break;
        }
        marked.insert(day, DayRole::Between);
        current = day.next_day();
    }
    marked.insert(end, DayRole::End);
    marked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> DateBound {
        DateBound::from_ymd(2025, m, day).unwrap()
    }

    #[test]
    fn test_four_day_range() {
        let range = DateRange::new(d(1, 10), Some(d(1, 13))).unwrap();
        let marked = compute_marked_days(&range);

        let roles: Vec<(DateBound, DayRole)> = marked.into_iter().collect();
        assert_eq!(
            roles,
            vec![
                (d(1, 10), DayRole::Start),
                (d(1, 11), DayRole::Between),
                (d(1, 12), DayRole::Between),
                (d(1, 13), DayRole::End),
            ]
        );
    }

    #[test]
    fn test_collapsed_range_is_single_entry() {
        let marked = compute_marked_days(&DateRange::single(d(1, 10)));
        assert_eq!(marked.len(), 1);
        let role = marked[&d(1, 10)];
        assert!(role.is_start());
        assert!(role.is_end());
    }

    #[test]
    fn test_open_range_is_single_entry() {
        let marked = compute_marked_days(&DateRange::open(d(1, 10)));
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[&d(1, 10)], DayRole::Single);
    }

    #[test]
    fn test_adjacent_days_have_no_between() {
        let range = DateRange::new(d(1, 31), Some(d(2, 1))).unwrap();
        let marked = compute_marked_days(&range);
        assert_eq!(marked.len(), 2);
        assert_eq!(marked[&d(1, 31)], DayRole::Start);
        assert_eq!(marked[&d(2, 1)], DayRole::End);
    }

    #[test]
    fn test_range_across_month_boundary() {
        let range = DateRange::new(d(2, 27), Some(d(3, 2))).unwrap();
        let marked = compute_marked_days(&range);
        // 2025 is not a leap year: 27, 28, 1, 2
        assert_eq!(marked.len(), 4);
        assert_eq!(marked[&d(2, 28)], DayRole::Between);
        assert_eq!(marked[&d(3, 1)], DayRole::Between);
    }
}
