//! Calendar definitions and the day-count engine.
//!
//! A [`Calendar`] is plain configuration data. Once [`Calendar::validate`]
//! accepts it, every conversion between a day-count and calendar fields is
//! a pure function of the day-count and the calendar.

use serde::{Deserialize, Serialize};

use crate::consts::{EPOCH_YEAR, FIRST_DAY, FIRST_MONTH, MAX_DAY_COUNT, MIN_DAY_COUNT};
use crate::leap_year::{LeapYearRule, from_virtual_year};
use crate::parse::{self, ParseError};
use crate::types::{Month, Season};
use crate::{Date, DateError};

/// A calendar configuration was rejected by [`Calendar::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Calendar must have at least one week day")]
    NoWeekDays,

    #[error("Calendar must have at least one month")]
    NoMonths,

    #[error("Calendar must have at least one season")]
    NoSeasons,

    #[error("Day zero week day {weekday} is not a valid week day (must be below {count})")]
    DayZeroWeekDay { weekday: usize, count: usize },

    #[error("Week day {index} has an empty name")]
    EmptyWeekDayName { index: usize },

    #[error("Month {month} has an empty name")]
    EmptyMonthName { month: usize },

    #[error("Month {name} must have at least 1 day")]
    EmptyMonth { name: String },

    #[error("Season names must not be empty")]
    EmptySeasonName,

    #[error("Season {name} starts in invalid month {month}")]
    SeasonStartMonth { name: String, month: usize },

    #[error("Season {name} starts on invalid day {month}/{day}")]
    SeasonStartDay { name: String, month: usize, day: u32 },

    #[error("Season {name} ends in invalid month {month}")]
    SeasonEndMonth { name: String, month: usize },

    #[error("Season {name} ends on invalid day {month}/{day}")]
    SeasonEndDay { name: String, month: usize, day: u32 },

    #[error("Leap year month {month} is not a valid month (must be 1-{months})")]
    LeapMonth { month: usize, months: usize },

    #[error("Leap year period {every} may not be less than 2")]
    LeapEvery { every: i64 },

    #[error("Leap year exception {except} must be greater than the period {every}")]
    LeapExceptTooSmall { except: i64, every: i64 },

    #[error("Leap year exception {except} must be a multiple of the period {every}")]
    LeapExceptNotMultiple { except: i64, every: i64 },

    #[error("Leap year override {unless} requires an exception")]
    LeapUnlessWithoutExcept { unless: i64 },

    #[error("Leap year override {unless} must be greater than the exception {except}")]
    LeapUnlessTooSmall { unless: i64, except: i64 },

    #[error("Leap year override {unless} must be a multiple of the exception {except}")]
    LeapUnlessNotMultiple { unless: i64, except: i64 },
}

/// A calendar could not be loaded from its serialized form.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed calendar definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Calendar fields derived from a day-count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateFields {
    pub year:         i64,
    /// 1-based month number
    pub month:        usize,
    /// 1-based day within the month
    pub day_in_month: u32,
    /// 1-based day within the year
    pub day_in_year:  i64,
    /// 0-based index into the calendar's week days
    pub weekday:      usize,
}

/// A user-defined calendar: week days, months, seasons, eras and an
/// optional leap year rule.
///
/// Day-count 0 is the first day of year 1. There is no year 0; the day
/// before day-count 0 is the last day of year -1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Calendar {
    /// Week day of day-count 0
    #[serde(default, alias = "first_weekday_of_first_year")]
    pub day_zero_weekday: usize,
    #[serde(rename = "weekdays")]
    pub week_days:        Vec<String>,
    pub months:           Vec<Month>,
    pub seasons:          Vec<Season>,
    /// Suffix for years on or after year 1, e.g. "AD"
    #[serde(default, skip_serializing_if = "String::is_empty", alias = "year_suffix")]
    pub era:              String,
    /// Suffix for years before year 1, e.g. "BC"
    #[serde(default, skip_serializing_if = "String::is_empty", alias = "year_before_suffix")]
    pub previous_era:     String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leap_year:        Option<LeapYearRule>,
}

impl Calendar {
    /// Loads a calendar from JSON and validates it.
    ///
    /// # Errors
    /// Returns `ConfigError::Json` for malformed input and
    /// `ConfigError::Invalid` when the definition breaks an invariant.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let calendar: Self = serde_json::from_str(json)?;
        calendar.validate()?;
        tracing::debug!(
            months = calendar.months.len(),
            week_days = calendar.week_days.len(),
            "loaded calendar definition"
        );
        Ok(calendar)
    }

    /// Checks every invariant of the definition, returning the first
    /// violation. Dates must only be built from a calendar that passed.
    ///
    /// # Errors
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.check().inspect_err(|err| {
            tracing::debug!(%err, "rejected calendar definition");
        })
    }

    fn check(&self) -> Result<(), ValidationError> {
        if self.week_days.is_empty() {
            return Err(ValidationError::NoWeekDays);
        }
        if self.months.is_empty() {
            return Err(ValidationError::NoMonths);
        }
        if self.seasons.is_empty() {
            return Err(ValidationError::NoSeasons);
        }
        if self.day_zero_weekday >= self.week_days.len() {
            return Err(ValidationError::DayZeroWeekDay {
                weekday: self.day_zero_weekday,
                count:   self.week_days.len(),
            });
        }
        if let Some(index) = self.week_days.iter().position(String::is_empty) {
            return Err(ValidationError::EmptyWeekDayName { index });
        }
        for (i, month) in self.months.iter().enumerate() {
            month.validate(i + 1)?;
        }
        for season in &self.seasons {
            season.validate(&self.months)?;
        }
        if let Some(rule) = &self.leap_year {
            rule.validate(self.months.len())?;
        }
        Ok(())
    }

    /// Number of days in a non-leap year.
    pub fn ordinary_year_length(&self) -> i64 {
        self.months.iter().map(|m| i64::from(m.days)).sum()
    }

    /// Number of days in `year`.
    pub fn year_length(&self, year: i64) -> i64 {
        self.ordinary_year_length() + i64::from(self.is_leap_year(year))
    }

    pub fn is_leap_year(&self, year: i64) -> bool {
        self.leap_year.is_some_and(|rule| rule.is_leap_year(year))
    }

    /// Returns true if `month` (1-based) receives the leap day.
    pub fn is_leap_month(&self, month: usize) -> bool {
        self.leap_year.is_some_and(|rule| rule.month == month)
    }

    /// Leap years strictly between year 1 and `year`. See
    /// [`LeapYearRule::leap_years_since`].
    pub fn leap_years_since(&self, year: i64) -> i64 {
        self.leap_year.map_or(0, |rule| rule.leap_years_since(year))
    }

    /// Number of days in `month` (1-based) of `year`, including the leap
    /// day. Returns 0 for a month that does not exist.
    pub fn days_in_month(&self, month: usize, year: i64) -> u32 {
        self.months.get(month.wrapping_sub(1)).map_or(0, |m| {
            m.days + u32::from(self.is_leap_month(month) && self.is_leap_year(year))
        })
    }

    /// Day-count of the first day of `year`. Year 0 does not exist.
    ///
    /// Saturates at the ends of `i64` for years whose start lies beyond it.
    pub fn year_start(&self, year: i64) -> i64 {
        let start = self.year_start_wide(year);
        i64::try_from(start).unwrap_or(if start < 0 { i64::MIN } else { i64::MAX })
    }

    fn year_start_wide(&self, year: i64) -> i128 {
        debug_assert!(year != 0, "there is no year 0");
        let length = i128::from(self.ordinary_year_length());
        let leap_days = i128::from(self.leap_years_since(year));
        if year >= EPOCH_YEAR {
            i128::from(year - EPOCH_YEAR) * length + leap_days
        } else {
            // The years year..=-1 all lie before the epoch; their total
            // length, including a leap day in `year` itself, is the offset.
            i128::from(year) * length - leap_days - i128::from(self.is_leap_year(year))
        }
    }

    /// The year containing `days`.
    pub fn year_of(&self, days: i64) -> i64 {
        // Every year has `length` or `length + 1` days, which brackets the
        // virtual year between the two quotients.
        let length = self.ordinary_year_length().max(1);
        let shortest = days.div_euclid(length);
        let longest = days.div_euclid(length + 1);
        // Virtual year `low` starts at or before `days`, `high` after it.
        let mut low = shortest.min(longest).saturating_sub(1);
        let mut high = shortest.max(longest).saturating_add(2);
        while high - low > 1 {
            let mid = low + (high - low) / 2;
            if self.year_start_wide(from_virtual_year(mid)) <= i128::from(days) {
                low = mid;
            } else {
                high = mid;
            }
        }
        from_virtual_year(low)
    }

    /// Splits a day-count into its calendar fields.
    ///
    /// # Errors
    /// Returns `DateError::InternalInconsistency` if the month table cannot
    /// place the day, which only happens for a calendar that fails
    /// validation.
    pub fn date_to_fields(&self, days: i64) -> Result<DateFields, DateError> {
        let year = self.year_of(days);
        let day_in_year = i64::try_from(i128::from(days) - self.year_start_wide(year) + 1)
            .map_err(|_| DateError::InternalInconsistency { days, year })?;
        let mut remaining = day_in_year;
        for month in FIRST_MONTH..=self.months.len() {
            let length = i64::from(self.days_in_month(month, year));
            if remaining <= length {
                let day_in_month =
                    u32::try_from(remaining).map_err(|_| DateError::InternalInconsistency { days, year })?;
                return Ok(DateFields {
                    year,
                    month,
                    day_in_month,
                    day_in_year,
                    weekday: self.weekday_of(days),
                });
            }
            remaining -= length;
        }
        Err(DateError::InternalInconsistency { days, year })
    }

    /// 0-based week day of `days`.
    pub fn weekday_of(&self, days: i64) -> usize {
        let count = self.week_days.len();
        let offset = days.rem_euclid(count as i64) as usize;
        (offset + self.day_zero_weekday) % count
    }

    /// Day-count of `month`/`day`/`year`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` for year 0, `DateError::InvalidMonth`
    /// for a month outside the calendar and `DateError::InvalidDay` for a day
    /// outside the month (the leap day counts in a leap year). A year so
    /// far from the epoch that its days fall outside
    /// [`MIN_DAY_COUNT`]`..=`[`MAX_DAY_COUNT`] is also `DateError::InvalidYear`.
    pub fn fields_to_day_count(&self, month: usize, day: u32, year: i64) -> Result<i64, DateError> {
        if year == 0 {
            return Err(DateError::InvalidYear(year));
        }
        if !(FIRST_MONTH..=self.months.len()).contains(&month) {
            return Err(DateError::InvalidMonth {
                month,
                months: self.months.len(),
            });
        }
        let max = self.days_in_month(month, year);
        if !(FIRST_DAY..=max).contains(&day) {
            return Err(DateError::InvalidDay {
                month,
                day,
                year,
                max,
            });
        }
        let preceding: i128 = (FIRST_MONTH..month)
            .map(|m| i128::from(self.days_in_month(m, year)))
            .sum();
        let days = self.year_start_wide(year) + preceding + i128::from(day - FIRST_DAY);
        i64::try_from(days)
            .ok()
            .filter(|days| (MIN_DAY_COUNT..=MAX_DAY_COUNT).contains(days))
            .ok_or(DateError::InvalidYear(year))
    }

    /// Builds a validated date.
    ///
    /// # Errors
    /// See [`Calendar::fields_to_day_count`].
    pub fn date(&self, month: usize, day: u32, year: i64) -> Result<Date<'_>, DateError> {
        Ok(Date::new(self.fields_to_day_count(month, day, year)?, self))
    }

    /// Wraps a raw day-count. Every integer is accepted; values outside
    /// [`MIN_DAY_COUNT`]`..=`[`MAX_DAY_COUNT`] are clamped to that range.
    pub const fn date_from_days(&self, days: i64) -> Date<'_> {
        Date::new(days, self)
    }

    /// Finds a date in free text. See [`parse::parse_date`].
    ///
    /// # Errors
    /// Returns `ParseError` if no date is found or the fields are invalid.
    pub fn parse_date(&self, text: &str) -> Result<Date<'_>, ParseError> {
        parse::parse_date(self, text)
    }

    /// Finds a month by full name or by its abbreviation, ignoring case.
    /// Returns the 1-based month number.
    pub fn month_by_name(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.months
            .iter()
            .position(|m| {
                let full = m.name.to_lowercase();
                full == wanted || crate::format::abbreviate(&full) == wanted
            })
            .map(|i| i + 1)
    }
}
