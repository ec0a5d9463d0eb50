//! Layout strings for dates.
//!
//! A layout is literal text with `%` directives:
//!
//! | Directive | Output                                               |
//! |-----------|------------------------------------------------------|
//! | `%W`      | week day name                                        |
//! | `%w`      | week day abbreviation                                |
//! | `%M`      | month name                                           |
//! | `%m`      | month abbreviation                                   |
//! | `%N`      | month number                                         |
//! | `%n`      | month number, zero padded to the widest month number |
//! | `%D`      | day of the month                                     |
//! | `%d`      | day of the month, zero padded to the month's length  |
//! | `%Y`      | year, suffixed with the previous era when negative   |
//! | `%y`      | year, always suffixed with its era                   |
//! | `%z`      | signed year without any era                          |
//! | `%%`      | a literal `%`                                        |
//!
//! Unknown directives produce no output.

use std::fmt::{self, Write};

use crate::Date;
use crate::consts::{ABBREVIATION_LENGTH, DIRECTIVE_MARKER};

/// The first [`ABBREVIATION_LENGTH`] characters of `name`.
pub(crate) fn abbreviate(name: &str) -> &str {
    match name.char_indices().nth(ABBREVIATION_LENGTH) {
        Some((end, _)) => &name[..end],
        None => name,
    }
}

/// Number of decimal digits needed to print `n`.
pub(crate) fn digit_count(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}

/// Collects the output of a `write_*` method into a `String`.
pub(crate) fn render<F>(write: F) -> String
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    struct Render<F>(F);

    impl<F> fmt::Display for Render<F>
    where
        F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            (self.0)(f)
        }
    }

    Render(write).to_string()
}

impl Date<'_> {
    /// Renders the date with a layout string. See the [module docs](self)
    /// for the directives.
    pub fn format(&self, layout: &str) -> String {
        render(|f| self.write_format(f, layout))
    }

    /// Streams the rendered layout into `w`.
    ///
    /// # Errors
    /// Only fails if `w` does.
    pub fn write_format<W: Write>(&self, w: &mut W, layout: &str) -> fmt::Result {
        let fields = self.fields();
        let calendar = self.calendar();
        let mut chars = layout.chars();
        while let Some(c) = chars.next() {
            if c != DIRECTIVE_MARKER {
                w.write_char(c)?;
                continue;
            }
            let Some(directive) = chars.next() else {
                break;
            };
            match directive {
                'W' => w.write_str(self.weekday_name())?,
                'w' => w.write_str(abbreviate(self.weekday_name()))?,
                'M' => w.write_str(self.month_name())?,
                'm' => w.write_str(abbreviate(self.month_name()))?,
                'N' => write!(w, "{}", fields.month)?,
                'n' => {
                    let width = digit_count(calendar.months.len() as u64);
                    write!(w, "{:0width$}", fields.month)?;
                }
                'D' => write!(w, "{}", fields.day_in_month)?,
                'd' => {
                    let longest = calendar.days_in_month(fields.month, fields.year);
                    let width = digit_count(u64::from(longest));
                    write!(w, "{:0width$}", fields.day_in_month)?;
                }
                'Y' => self.write_year(w, fields.year)?,
                'y' => self.write_year_with_era(w, fields.year)?,
                'z' => write!(w, "{}", fields.year)?,
                DIRECTIVE_MARKER => w.write_char(DIRECTIVE_MARKER)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn write_year<W: Write>(&self, w: &mut W, year: i64) -> fmt::Result {
        let calendar = self.calendar();
        if calendar.previous_era.is_empty() {
            write!(w, "{year}")
        } else if calendar.era == calendar.previous_era {
            write!(w, "{year} {}", calendar.previous_era)
        } else if year < 0 {
            write!(w, "{} {}", -year, calendar.previous_era)
        } else {
            write!(w, "{year}")
        }
    }

    fn write_year_with_era<W: Write>(&self, w: &mut W, year: i64) -> fmt::Result {
        let calendar = self.calendar();
        let era = self.era();
        // A distinct previous era carries the sign itself.
        let shown = if year < 0 && !era.is_empty() && calendar.era != calendar.previous_era {
            -year
        } else {
            year
        };
        if era.is_empty() {
            write!(w, "{shown}")
        } else {
            write!(w, "{shown} {era}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FULL_FORMAT, LONG_FORMAT, MEDIUM_FORMAT, SHORT_FORMAT};
    use crate::presets::{absalom_reckoning, gregorian};
    use crate::test_utils::{gregorian_date, tiny_calendar};

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("September"), "Sep");
        assert_eq!(abbreviate("May"), "May");
        assert_eq!(abbreviate("Oz"), "Oz");
        assert_eq!(abbreviate(""), "");
        assert_eq!(abbreviate("Þrymsdag"), "Þry");
        assert_eq!(abbreviate("Ōdaybreak"), "Ōda");
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(31), 2);
        assert_eq!(digit_count(100), 3);
    }

    #[test]
    fn test_format_cases() {
        struct TestCase {
            layout:   &'static str,
            expected: &'static str,
        }

        let cases = [
            TestCase {
                layout:   SHORT_FORMAT,
                expected: "9/22/2017",
            },
            TestCase {
                layout:   MEDIUM_FORMAT,
                expected: "Sep 22, 2017",
            },
            TestCase {
                layout:   LONG_FORMAT,
                expected: "September 22, 2017",
            },
            TestCase {
                layout:   FULL_FORMAT,
                expected: "Friday, September 22, 2017",
            },
            TestCase {
                layout:   "%W, %M %D, %y",
                expected: "Friday, September 22, 2017 AD",
            },
            TestCase {
                layout:   "%w %m",
                expected: "Fri Sep",
            },
            TestCase {
                layout:   "%%%w%%",
                expected: "%Fri%",
            },
            TestCase {
                layout:   "%z",
                expected: "2017",
            },
            TestCase {
                layout:   "no directives",
                expected: "no directives",
            },
            TestCase {
                layout:   "%q%N",
                expected: "9",
            },
            TestCase {
                layout:   "%D%",
                expected: "22",
            },
        ];

        let date = gregorian_date(9, 22, 2017);
        for case in &cases {
            assert_eq!(date.format(case.layout), case.expected, "Layout {}", case.layout);
        }
    }

    #[test]
    fn test_format_before_epoch() {
        let date = gregorian_date(9, 22, -1);
        assert_eq!(date.format(SHORT_FORMAT), "9/22/1 BC");
        assert_eq!(date.format(MEDIUM_FORMAT), "Sep 22, 1 BC");
        assert_eq!(date.format(FULL_FORMAT), "Friday, September 22, 1 BC");
        assert_eq!(date.format("%y"), "1 BC");
        assert_eq!(date.format("%z"), "-1");
    }

    #[test]
    fn test_zero_padding() {
        let date = gregorian_date(1, 5, 2017);
        assert_eq!(date.format("%n/%d/%Y"), "01/05/2017");
        assert_eq!(gregorian_date(11, 15, 2017).format("%n/%d"), "11/15");

        // Only as wide as the calendar needs
        let tiny = tiny_calendar();
        let date = tiny.date(2, 3, 1).unwrap();
        assert_eq!(date.format("%n/%d"), "2/3");
    }

    #[test]
    fn test_shared_era() {
        let cal = absalom_reckoning();
        let date = cal.date(9, 22, 4712).unwrap();
        assert_eq!(date.format("%Y"), "4712 AR");
        assert_eq!(date.format("%y"), "4712 AR");
        assert_eq!(date.format(SHORT_FORMAT), "9/22/4712 AR");

        let date = cal.date(9, 22, -5).unwrap();
        assert_eq!(date.format("%Y"), "-5 AR");
        assert_eq!(date.format("%y"), "-5 AR");
    }

    #[test]
    fn test_empty_eras() {
        let cal = tiny_calendar();
        let date = cal.date(1, 1, -5).unwrap();
        assert_eq!(date.format("%Y"), "-5");
        assert_eq!(date.format("%y"), "-5");
        assert_eq!(date.format(SHORT_FORMAT), "1/1/-5");
    }

    #[test]
    fn test_non_ascii_names() {
        let cal = tiny_calendar();
        let date = cal.date(1, 1, 1).unwrap();
        assert_eq!(date.format("%W %w"), "Ásdag Ásd");
        assert_eq!(date.format("%M %m"), "Élan Éla");
    }

    #[test]
    fn test_write_format_into_formatter() {
        let cal = gregorian();
        let date = cal.date(12, 25, 1999).unwrap();
        assert_eq!(format!("{date}"), "12/25/1999");
        let mut out = String::from("Date: ");
        date.write_format(&mut out, LONG_FORMAT).unwrap();
        assert_eq!(out, "Date: December 25, 1999");
    }

    #[test]
    fn test_format_matches_write_format() {
        let cal = absalom_reckoning();
        for days in [-800_000, -1, 0, 1_720_000] {
            let date = cal.date_from_days(days);
            for layout in [SHORT_FORMAT, FULL_FORMAT, "%w %m %n/%d %y %z %%"] {
                let mut out = String::new();
                date.write_format(&mut out, layout).unwrap();
                assert_eq!(date.format(layout), out, "Layout {layout}");
            }
        }
        assert_eq!(render(|f| f.write_str("plain")), "plain");
    }
}
