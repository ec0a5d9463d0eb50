//! Finding dates in free text.
//!
//! Two shapes are recognised anywhere in the input: numeric
//! (`9/22/2017`) and named (`September 22, 2017` or `Sep 22, 2017`). Either
//! may be followed by an era token. The numeric shape is tried first and
//! the first match wins.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{Calendar, Date, DateError};

#[allow(clippy::expect_used)]
static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)/([0-9]+)/(-?[0-9]+)(?:\s+(\p{Alphabetic}+))?").expect("numeric date pattern")
});

#[allow(clippy::expect_used)]
static NAMED_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\p{Alphabetic}+)\s*([0-9]*),\s*(-?[0-9]+)(?:\s+(\p{Alphabetic}+))?")
        .expect("named date pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("No date found in: {0}")]
    NoMatch(String),

    #[error("Unknown month: {0}")]
    UnknownMonth(String),

    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    #[error(transparent)]
    Date(#[from] DateError),
}

/// Finds the first date in `text` and validates it against `calendar`.
///
/// An era token negates the year when it names the calendar's previous era
/// (ignoring case) and that era differs from the current one. Any other
/// trailing word is ignored.
///
/// # Errors
/// Returns `ParseError::NoMatch` when neither shape appears,
/// `ParseError::UnknownMonth` for a month name the calendar lacks,
/// `ParseError::InvalidNumber` for a numeric field that does not fit and
/// `ParseError::Date` when the fields do not name a real day.
pub fn parse_date<'c>(calendar: &'c Calendar, text: &str) -> Result<Date<'c>, ParseError> {
    if let Some(caps) = NUMERIC_DATE.captures(text) {
        tracing::trace!(text, matched = &caps[0], "found numeric date");
        let month = parse_number(&caps[1])?;
        let day = parse_number(&caps[2])?;
        let year = resolve_era(calendar, parse_number(&caps[3])?, &caps)?;
        return Ok(calendar.date(month, day, year)?);
    }

    if let Some(caps) = NAMED_DATE.captures(text) {
        tracing::trace!(text, matched = &caps[0], "found named date");
        let month = calendar
            .month_by_name(&caps[1])
            .ok_or_else(|| ParseError::UnknownMonth(caps[1].to_owned()))?;
        let day = parse_number(&caps[2])?;
        let year = resolve_era(calendar, parse_number(&caps[3])?, &caps)?;
        return Ok(calendar.date(month, day, year)?);
    }

    tracing::trace!(text, "no date found");
    Err(ParseError::NoMatch(text.to_owned()))
}

fn parse_number<T: FromStr>(digits: &str) -> Result<T, ParseError> {
    digits
        .parse()
        .map_err(|_| ParseError::InvalidNumber(digits.to_owned()))
}

fn resolve_era(calendar: &Calendar, year: i64, caps: &Captures<'_>) -> Result<i64, ParseError> {
    let Some(era) = caps.get(4) else {
        return Ok(year);
    };
    let previous = &calendar.previous_era;
    if !previous.is_empty()
        && calendar.era != *previous
        && era.as_str().to_lowercase() == previous.to_lowercase()
    {
        year.checked_neg().ok_or_else(|| ParseError::InvalidNumber(caps[3].to_owned()))
    } else {
        Ok(year)
    }
}
