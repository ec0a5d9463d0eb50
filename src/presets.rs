//! Ready-made calendars.

use once_cell::sync::Lazy;

use crate::consts::{ABSALOM_RECKONING_ERA, FIRST_DAY, IMPERIAL_CALENDAR_ERA, IMPERIAL_YEAR_OFFSET};
use crate::leap_year::{LeapYearRule, from_virtual_year, virtual_year};
use crate::{Calendar, Date, DateError, Month, Season};

/// A shared instance of [`gregorian`], for when a `'static` calendar is
/// convenient.
pub static GREGORIAN: Lazy<Calendar> = Lazy::new(gregorian);

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|&n| n.to_owned()).collect()
}

fn months(table: &[(&str, u32)]) -> Vec<Month> {
    table.iter().map(|&(name, days)| Month::new(name, days)).collect()
}

fn four_seasons() -> Vec<Season> {
    vec![
        Season::new("Winter", (11, 1), (2, 28)),
        Season::new("Spring", (3, 1), (5, 31)),
        Season::new("Summer", (6, 1), (8, 31)),
        Season::new("Fall", (9, 1), (10, 31)),
    ]
}

/// The proleptic Gregorian calendar with AD/BC eras. 1/1/1 is a Monday.
pub fn gregorian() -> Calendar {
    Calendar {
        day_zero_weekday: 1,
        week_days:        names(&[
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ]),
        months:           months(&[
            ("January", 31),
            ("February", 28),
            ("March", 31),
            ("April", 30),
            ("May", 31),
            ("June", 30),
            ("July", 31),
            ("August", 31),
            ("September", 30),
            ("October", 31),
            ("November", 30),
            ("December", 31),
        ]),
        seasons:          four_seasons(),
        era:              "AD".to_owned(),
        previous_era:     "BC".to_owned(),
        leap_year:        Some(LeapYearRule {
            month:  2,
            every:  4,
            except: 100,
            unless: 400,
        }),
    }
}

fn golarion(era: &str) -> Calendar {
    Calendar {
        day_zero_weekday: 0,
        week_days:        names(&[
            "Moonday", "Toilday", "Wealday", "Oathday", "Fireday", "Starday", "Sunday",
        ]),
        months:           months(&[
            ("Abadius", 31),
            ("Calistril", 28),
            ("Pharast", 31),
            ("Gozran", 30),
            ("Desnus", 31),
            ("Sarenith", 30),
            ("Erastus", 31),
            ("Arodus", 31),
            ("Rova", 30),
            ("Lamashan", 31),
            ("Neth", 30),
            ("Kuthona", 31),
        ]),
        seasons:          four_seasons(),
        era:              era.to_owned(),
        previous_era:     era.to_owned(),
        leap_year:        Some(LeapYearRule::every(2, 8)),
    }
}

/// The Absalom Reckoning calendar of the Pathfinder setting.
pub fn absalom_reckoning() -> Calendar {
    golarion(ABSALOM_RECKONING_ERA)
}

/// The Imperial Calendar of the Pathfinder setting. Identical in shape to
/// Absalom Reckoning, with years counted 2500 higher.
pub fn imperial_calendar() -> Calendar {
    golarion(IMPERIAL_CALENDAR_ERA)
}

/// Converts an Absalom Reckoning date to the same day in `imperial`.
///
/// # Errors
/// Returns a `DateError` if `imperial` does not share the month layout of
/// the source calendar.
pub fn absalom_to_imperial<'i>(date: Date<'_>, imperial: &'i Calendar) -> Result<Date<'i>, DateError> {
    shift_years(date, imperial, IMPERIAL_YEAR_OFFSET)
}

/// Converts an Imperial Calendar date to the same day in `absalom`.
///
/// # Errors
/// Returns a `DateError` if `absalom` does not share the month layout of
/// the source calendar.
pub fn imperial_to_absalom<'a>(date: Date<'_>, absalom: &'a Calendar) -> Result<Date<'a>, DateError> {
    shift_years(date, absalom, -IMPERIAL_YEAR_OFFSET)
}

/// Moves `date` into `target`, `offset` years along. A day that does not
/// exist in the target year (a leap day) becomes the first day of the
/// following month.
fn shift_years<'t>(date: Date<'_>, target: &'t Calendar, offset: i64) -> Result<Date<'t>, DateError> {
    let fields = date.fields();
    let year = from_virtual_year(virtual_year(fields.year) + offset);
    match target.date(fields.month, fields.day_in_month, year) {
        Err(DateError::InvalidDay { month, max, .. }) if max >= FIRST_DAY => {
            tracing::debug!(%date, year, "day missing from target year, using next month");
            let start = target.fields_to_day_count(month, FIRST_DAY, year)?;
            Ok(target.date_from_days(start + i64::from(max)))
        }
        result => result,
    }
}
