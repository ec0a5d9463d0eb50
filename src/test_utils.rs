use crate::leap_year::{LeapYearRule, next_year};
use crate::presets::GREGORIAN;
use crate::{Calendar, Date, Month, Season};

/// A small calendar with short months, a three day week, non-ASCII names,
/// no eras and a leap rule using every field.
pub fn tiny_calendar() -> Calendar {
    Calendar {
        day_zero_weekday: 1,
        week_days:        vec!["Þrymr".to_owned(), "Ásdag".to_owned(), "Ōday".to_owned()],
        months:           vec![
            Month::new("Élan", 5),
            Month::new("Ýmir", 3),
            Month::new("Öld", 4),
        ],
        seasons:          vec![Season::new("Mild", (1, 1), (3, 4))],
        era:              String::new(),
        previous_era:     String::new(),
        leap_year:        Some(LeapYearRule {
            month:  2,
            every:  2,
            except: 6,
            unless: 18,
        }),
    }
}

/// Day-count of the first day of `year`, found by summing year lengths
/// outward from the epoch.
pub fn brute_force_year_start(calendar: &Calendar, year: i64) -> i64 {
    if year >= 1 {
        (1..year).map(|y| calendar.year_length(y)).sum()
    } else {
        let mut days = 0;
        let mut y = year;
        while y < 0 {
            days -= calendar.year_length(y);
            y = next_year(y);
        }
        days
    }
}

/// A date in the shared Gregorian calendar.
pub fn gregorian_date(month: usize, day: u32, year: i64) -> Date<'static> {
    GREGORIAN.date(month, day, year).unwrap()
}
