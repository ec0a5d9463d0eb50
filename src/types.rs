use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::ValidationError;

/// A named month with its ordinary (non-leap) length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Month {
    pub name: String,
    pub days: u32,
}

impl Month {
    pub fn new(name: impl Into<String>, days: u32) -> Self {
        Self {
            name: name.into(),
            days,
        }
    }

    /// Checks the month sitting at 1-based position `month` of its calendar.
    ///
    /// # Errors
    /// Returns `ValidationError::EmptyMonthName` or `ValidationError::EmptyMonth`.
    pub fn validate(&self, month: usize) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyMonthName { month });
        }
        if self.days < 1 {
            return Err(ValidationError::EmptyMonth {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// A named seasonal period. Seasons are descriptive only and never take part
/// in date arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season {
    pub name:        String,
    pub start_month: usize,
    pub start_day:   u32,
    pub end_month:   usize,
    pub end_day:     u32,
}

impl Season {
    pub fn new(
        name: impl Into<String>,
        (start_month, start_day): (usize, u32),
        (end_month, end_day): (usize, u32),
    ) -> Self {
        Self {
            name: name.into(),
            start_month,
            start_day,
            end_month,
            end_day,
        }
    }

    /// Checks that the season starts and ends on days that exist in `months`.
    ///
    /// # Errors
    /// Returns the first out-of-range bound.
    pub fn validate(&self, months: &[Month]) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptySeasonName);
        }
        let start = months
            .get(self.start_month.wrapping_sub(1))
            .ok_or_else(|| ValidationError::SeasonStartMonth {
                name:  self.name.clone(),
                month: self.start_month,
            })?;
        if self.start_day < 1 || self.start_day > start.days {
            return Err(ValidationError::SeasonStartDay {
                name:  self.name.clone(),
                month: self.start_month,
                day:   self.start_day,
            });
        }
        let end = months
            .get(self.end_month.wrapping_sub(1))
            .ok_or_else(|| ValidationError::SeasonEndMonth {
                name:  self.name.clone(),
                month: self.end_month,
            })?;
        if self.end_day < 1 || self.end_day > end.days {
            return Err(ValidationError::SeasonEndDay {
                name:  self.name.clone(),
                month: self.end_month,
                day:   self.end_day,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_month == self.end_month && self.start_day == self.end_day {
            write!(f, "{} ({}/{})", self.name, self.start_month, self.start_day)
        } else {
            write!(
                f,
                "{} ({}/{}-{}/{})",
                self.name, self.start_month, self.start_day, self.end_month, self.end_day
            )
        }
    }
}
