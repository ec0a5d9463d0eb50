//! Tools for tabletop roleplaying games: user-defined calendars with leap
//! year rules and eras, date arithmetic, formatting and parsing over those
//! calendars, and dice notation.
//!
//! ```
//! use rpgtools::{FULL_FORMAT, presets};
//!
//! let calendar = presets::gregorian();
//! let date = calendar.date(9, 22, 2017).unwrap();
//! assert_eq!(date.format(FULL_FORMAT), "Friday, September 22, 2017");
//! assert_eq!(calendar.parse_date("Sep 22, 2017 AD").unwrap(), date);
//! ```

mod calendar;
mod consts;
pub mod dice;
mod format;
mod leap_year;
mod parse;
mod prelude;
pub mod presets;
mod text;
mod types;

#[cfg(test)]
mod test_utils;

pub use calendar::{Calendar, ConfigError, DateFields, ValidationError};
pub use consts::*;
pub use leap_year::{LeapYearRule, from_virtual_year, next_year, previous_year, virtual_year};
pub use parse::{ParseError, parse_date};
pub use types::{Month, Season};

use crate::prelude::*;
use serde::de::{DeserializeSeed, Deserializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single day in a [`Calendar`].
///
/// Stored as the number of days since the first day of year 1. The value -1
/// is the last day of year -1, as there is no year 0. Every other field is
/// derived from the day-count on demand. The day-count always lies within
/// [`MIN_DAY_COUNT`]`..=`[`MAX_DAY_COUNT`].
#[derive(Clone, Copy)]
pub struct Date<'c> {
    days:     i64,
    calendar: &'c Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DateError {
    #[display(fmt = "Invalid year: {_0} (there is no year 0)")]
    InvalidYear(i64),
    #[display(fmt = "Invalid month: {month} (must be 1-{months})")]
    InvalidMonth { month: usize, months: usize },
    #[display(fmt = "Invalid day {day} for month {month} of year {year} (must be 1-{max})")]
    InvalidDay {
        month: usize,
        day:   u32,
        year:  i64,
        max:   u32,
    },
    #[display(fmt = "Unable to place day-count {days} within year {year}")]
    InternalInconsistency { days: i64, year: i64 },
}

impl std::error::Error for DateError {}

impl<'c> Date<'c> {
    pub(crate) const fn new(days: i64, calendar: &'c Calendar) -> Self {
        let days = if days > MAX_DAY_COUNT {
            MAX_DAY_COUNT
        } else if days < MIN_DAY_COUNT {
            MIN_DAY_COUNT
        } else {
            days
        };
        Self { days, calendar }
    }

    /// Days since the first day of year 1
    pub const fn days(&self) -> i64 {
        self.days
    }

    /// The calendar this date belongs to
    pub const fn calendar(&self) -> &'c Calendar {
        self.calendar
    }

    /// All derived calendar fields at once.
    ///
    /// # Panics
    /// Panics if the calendar fails validation badly enough that the day
    /// cannot be placed in a month.
    pub fn fields(&self) -> DateFields {
        match self.calendar.date_to_fields(self.days) {
            Ok(fields) => fields,
            Err(err) => panic!("{err}"),
        }
    }

    /// Year of the date. Never 0.
    pub fn year(&self) -> i64 {
        self.calendar.year_of(self.days)
    }

    /// Month of the date, starting at 1.
    pub fn month(&self) -> usize {
        self.fields().month
    }

    pub fn month_name(&self) -> &'c str {
        &self.calendar.months[self.month() - 1].name
    }

    /// Day within the month, starting at 1.
    pub fn day_in_month(&self) -> u32 {
        self.fields().day_in_month
    }

    /// Day within the year, starting at 1.
    pub fn day_in_year(&self) -> i64 {
        self.days - self.calendar.year_start(self.year()) + 1
    }

    /// Number of days in the month of the date, including any leap day.
    pub fn days_in_month(&self) -> u32 {
        let fields = self.fields();
        self.calendar.days_in_month(fields.month, fields.year)
    }

    /// Week day of the date as an index into the calendar's week days.
    pub fn weekday(&self) -> usize {
        self.calendar.weekday_of(self.days)
    }

    pub fn weekday_name(&self) -> &'c str {
        &self.calendar.week_days[self.weekday()]
    }

    /// The era suffix that applies to the year of the date.
    pub fn era(&self) -> &'c str {
        if self.year() < 0 {
            &self.calendar.previous_era
        } else {
            &self.calendar.era
        }
    }

    /// The date `days` days later (or earlier, for a negative value),
    /// clamped to [`MIN_DAY_COUNT`]`..=`[`MAX_DAY_COUNT`].
    #[must_use]
    pub const fn add_days(&self, days: i64) -> Self {
        Self::new(self.days.saturating_add(days), self.calendar)
    }

    fn same_calendar(&self, other: &Self) -> bool {
        std::ptr::eq(self.calendar, other.calendar) || self.calendar == other.calendar
    }
}

impl fmt::Display for Date<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_format(f, SHORT_FORMAT)
    }
}

impl fmt::Debug for Date<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Date")
            .field("days", &self.days)
            .field("date", &format_args!("{self}"))
            .finish()
    }
}

impl PartialEq for Date<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.days == other.days && self.same_calendar(other)
    }
}

impl Eq for Date<'_> {}

impl Hash for Date<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.days.hash(state);
    }
}

impl PartialOrd for Date<'_> {
    /// Dates from different calendars are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_calendar(other).then(|| self.days.cmp(&other.days))
    }
}

impl serde::Serialize for Date<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Deserializes a [`Date`] from its text form within a given calendar.
#[derive(Debug, Clone, Copy, From)]
pub struct DateSeed<'c>(pub &'c Calendar);

impl<'de, 'c> DeserializeSeed<'de> for DateSeed<'c> {
    type Value = Date<'c>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        self.0.parse_date(&s).map_err(serde::de::Error::custom)
    }
}
