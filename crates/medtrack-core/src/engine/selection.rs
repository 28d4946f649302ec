//! Two-tap day selection on the calendar.
//!
//! States:
//! - `SelectingEnd`: a start day is chosen, the end is not.
//! - `Complete`: both ends are chosen. The next tap starts over.
//!
//! There is no terminal state; completion re-arms `SelectingEnd` on the
//! following tap.

use serde::{Deserialize, Serialize};

use crate::models::{DateBound, DateRange};

/// What to do when the second tap lands before the chosen start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Treat the earlier tap as a new start and keep waiting for an end.
    #[default]
    Restart,
    /// Keep both taps and close the range in date order.
    Normalize,
}

/// Where the selection stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    SelectingEnd,
    Complete,
}

impl SelectionState {
    pub fn of(range: &DateRange) -> Self {
        if range.is_complete() {
            SelectionState::Complete
        } else {
            SelectionState::SelectingEnd
        }
    }
}

/// Result of a single tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub range: DateRange,
    /// The tap completed a range and the day picker should close.
    pub collapse_calendar: bool,
}

impl SelectionOutcome {
    pub fn state(&self) -> SelectionState {
        SelectionState::of(&self.range)
    }
}

/// Apply one tap to the current range.
pub fn next_range(current: DateRange, day: DateBound, policy: SelectionPolicy) -> SelectionOutcome {
    if current.is_complete() {
        return SelectionOutcome {
            range: DateRange::open(day),
            collapse_calendar: false,
        };
    }

    let start = current.start();
    if day < start {
        return match policy {
            SelectionPolicy::Restart => SelectionOutcome {
                range: DateRange::open(day),
                collapse_calendar: false,
            },
            SelectionPolicy::Normalize => SelectionOutcome {
                range: closed(day, start),
                collapse_calendar: true,
            },
        };
    }

    SelectionOutcome {
        range: closed(start, day),
        collapse_calendar: true,
    }
}

fn closed(start: DateBound, end: DateBound) -> DateRange {
    // Callers pass start <= end, so `new` cannot refuse.
    DateRange::new(start, Some(end)).unwrap_or_else(|| DateRange::single(start))
}
