//! Calendar dates and date ranges.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage/serialization format.
const ISO_FORMAT: &str = "%Y-%m-%d";
/// Format used by the registration forms and list headers.
const DISPLAY_FORMAT: &str = "%d/%m/%Y";
/// Clock times accepted after an ISO date. `%.f` also matches no fraction.
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Error returned when a string cannot be read as a calendar date.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid date: {input:?}")]
pub struct DateParseError {
    pub input: String,
}

/// A calendar date with no time-of-day component.
///
/// Ordering is (year, month, day). Timestamps are reduced to the calendar
/// date as written, with no timezone conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateBound(NaiveDate);

impl DateBound {
    /// Build a date from its parts, `None` if the day does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse an ISO `YYYY-MM-DD` date, ignoring a trailing time of day.
    ///
    /// Anything after the date must be a time such as `T10:00:00Z` or
    /// ` 08:00`; any other suffix is rejected.
    pub fn parse_iso(input: &str) -> Result<Self, DateParseError> {
        let invalid = || DateParseError {
            input: input.to_string(),
        };
        let (date, rest) =
            NaiveDate::parse_and_remainder(input.trim(), ISO_FORMAT).map_err(|_| invalid())?;
        if rest.is_empty() || is_time_of_day(rest) {
            Ok(Self(date))
        } else {
            Err(invalid())
        }
    }

    /// Parse a `DD/MM/YYYY` date as typed in the registration forms.
    pub fn parse_display(input: &str) -> Result<Self, DateParseError> {
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.split('/').collect();
        // Day and month may omit the leading zero, the year must be complete.
        let well_formed = parts.len() == 3
            && (1..=2).contains(&parts[0].len())
            && (1..=2).contains(&parts[1].len())
            && parts[2].len() == 4;
        if !well_formed {
            return Err(DateParseError {
                input: input.to_string(),
            });
        }
        NaiveDate::parse_from_str(trimmed, DISPLAY_FORMAT)
            .map(Self)
            .map_err(|_| DateParseError {
                input: input.to_string(),
            })
    }

    /// Accept either the ISO or the display format.
    pub fn parse_any(input: &str) -> Result<Self, DateParseError> {
        if input.contains('/') {
            Self::parse_display(input)
        } else {
            Self::parse_iso(input)
        }
    }

    /// Today's date in the local timezone.
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The following calendar day, `None` past the end of the supported range.
    pub fn next_day(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// `YYYY-MM-DD`.
    pub fn to_iso(&self) -> String {
        self.0.format(ISO_FORMAT).to_string()
    }

    /// `DD/MM/YYYY`.
    pub fn to_display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateBound {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DateBound {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

impl TryFrom<String> for DateBound {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_iso(&value)
    }
}

impl From<DateBound> for String {
    fn from(date: DateBound) -> Self {
        date.to_iso()
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso())
    }
}

/// `T` or a space, a clock time, then an optional `Z` or UTC offset.
fn is_time_of_day(rest: &str) -> bool {
    let Some(clock) = rest.strip_prefix(['T', ' ']) else {
        return false;
    };
    TIME_FORMATS.iter().any(|format| {
        NaiveTime::parse_and_remainder(clock, format).is_ok_and(|(_, zone)| {
            zone.is_empty() || zone == "Z" || zone.parse::<FixedOffset>().is_ok()
        })
    })
}

/// A selected interval of days.
///
/// `end == None` means the selection is still in progress. When present,
/// `end >= start` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: DateBound,
    end: Option<DateBound>,
}

impl DateRange {
    /// Build a range, rejecting an end before the start.
    pub fn new(start: DateBound, end: Option<DateBound>) -> Option<Self> {
        match end {
            Some(end) if end < start => None,
            _ => Some(Self { start, end }),
        }
    }

    /// A completed range covering a single day.
    pub fn single(day: DateBound) -> Self {
        Self {
            start: day,
            end: Some(day),
        }
    }

    /// A range whose end has not been chosen yet.
    pub fn open(start: DateBound) -> Self {
        Self { start, end: None }
    }

    pub fn start(&self) -> DateBound {
        self.start
    }

    pub fn end(&self) -> Option<DateBound> {
        self.end
    }

    /// Whether both ends have been chosen.
    pub fn is_complete(&self) -> bool {
        self.end.is_some()
    }

    /// Whether the range covers exactly one day (or only has a start).
    pub fn is_collapsed(&self) -> bool {
        self.end.map_or(true, |end| end == self.start)
    }

    /// Last day covered. An open range covers its start only.
    pub fn effective_end(&self) -> DateBound {
        self.end.unwrap_or(self.start)
    }

    /// Inclusive membership test.
    pub fn contains(&self, day: DateBound) -> bool {
        day >= self.start && day <= self.effective_end()
    }
}
