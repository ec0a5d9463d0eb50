use serde::{Deserialize, Serialize};

use crate::calendar::ValidationError;

/// Maps a calendar year onto a continuous number line.
///
/// There is no year 0: year -1 immediately precedes year 1. Shifting the
/// negative years up by one makes the year sequence gap-free, so modulo
/// tests and year offsets behave the same on both sides of the epoch.
#[inline]
pub const fn virtual_year(year: i64) -> i64 {
    if year < 1 { year + 1 } else { year }
}

/// Inverse of [`virtual_year`]. Saturates at `i64::MIN`.
#[inline]
pub const fn from_virtual_year(virtual_year: i64) -> i64 {
    if virtual_year < 1 { virtual_year.saturating_sub(1) } else { virtual_year }
}

/// The year after `year`, skipping year 0. Saturates at `i64::MAX`.
#[inline]
pub const fn next_year(year: i64) -> i64 {
    from_virtual_year(virtual_year(year).saturating_add(1))
}

/// The year before `year`, skipping year 0.
#[inline]
pub const fn previous_year(year: i64) -> i64 {
    from_virtual_year(virtual_year(year) - 1)
}

/// Periodic leap-year rule.
///
/// Years divisible by `every` are leap years, except those divisible by
/// `except`, unless they are also divisible by `unless`. A value of 0 for
/// `except` or `unless` disables that part of the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeapYearRule {
    /// 1-based index of the month that gains the extra day
    pub month:  usize,
    pub every:  i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub except: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub unless: i64,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl LeapYearRule {
    /// Creates a rule with only a base period.
    pub const fn every(month: usize, every: i64) -> Self {
        Self {
            month,
            every,
            except: 0,
            unless: 0,
        }
    }

    /// Checks the rule against a calendar with `month_count` months.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self, month_count: usize) -> Result<(), ValidationError> {
        if self.month < 1 || self.month > month_count {
            return Err(ValidationError::LeapMonth {
                month: self.month,
                months: month_count,
            });
        }
        if self.every < 2 {
            return Err(ValidationError::LeapEvery { every: self.every });
        }
        if self.except != 0 {
            if self.except <= self.every {
                return Err(ValidationError::LeapExceptTooSmall {
                    except: self.except,
                    every:  self.every,
                });
            }
            if self.except % self.every != 0 {
                return Err(ValidationError::LeapExceptNotMultiple {
                    except: self.except,
                    every:  self.every,
                });
            }
        }
        if self.unless != 0 {
            if self.except == 0 {
                return Err(ValidationError::LeapUnlessWithoutExcept {
                    unless: self.unless,
                });
            }
            if self.unless <= self.except {
                return Err(ValidationError::LeapUnlessTooSmall {
                    unless: self.unless,
                    except: self.except,
                });
            }
            if self.unless % self.except != 0 {
                return Err(ValidationError::LeapUnlessNotMultiple {
                    unless: self.unless,
                    except: self.except,
                });
            }
        }
        Ok(())
    }

    /// Returns true if `year` is a leap year. Year 0 does not exist and is
    /// treated like year 1.
    pub const fn is_leap_year(&self, year: i64) -> bool {
        self.is_leap_virtual(virtual_year(year))
    }

    const fn is_leap_virtual(&self, year: i64) -> bool {
        if year % self.every != 0 {
            return false;
        }
        if self.except != 0 && year % self.except == 0 {
            return self.unless != 0 && year % self.unless == 0;
        }
        true
    }

    /// Number of leap years between year 1 and `year`, exclusive of both.
    ///
    /// For negative years this counts the leap years in `year+1..=-1`, i.e.
    /// those lying between `year` and the epoch.
    pub const fn leap_years_since(&self, year: i64) -> i64 {
        if year == -1 {
            return 0;
        }
        // Distance from the virtual year 0, which for negative years is the
        // span -distance..=-1 of virtual years. The multiple counts are
        // symmetric around 0.
        let distance = virtual_year(year).abs();
        let mut count = self.multiples_up_to(distance);
        if self.is_leap_year(year) {
            count -= 1;
        }
        // Virtual year 0 (year -1) lies between every negative year and the
        // epoch but is not part of the symmetric count.
        if year < -1 && self.is_leap_virtual(0) {
            count += 1;
        }
        count
    }

    /// Leap years among the virtual years `1..=distance`.
    const fn multiples_up_to(&self, distance: i64) -> i64 {
        let mut count = distance / self.every;
        if self.except != 0 {
            count -= distance / self.except;
            if self.unless != 0 {
                count += distance / self.unless;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREGORIAN_RULE: LeapYearRule = LeapYearRule {
        month:  2,
        every:  4,
        except: 100,
        unless: 400,
    };

    /// Counts leap years one year at a time.
    fn brute_force_since(rule: &LeapYearRule, year: i64) -> i64 {
        if year > 0 {
            (1..year).filter(|&y| rule.is_leap_year(y)).count() as i64
        } else {
            (year + 1..=-1).filter(|&y| rule.is_leap_year(y)).count() as i64
        }
    }

    fn civil_leap(year: i64) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    #[test]
    fn test_virtual_year_round_trip() {
        for year in (-500..=500).filter(|&y| y != 0) {
            assert_eq!(from_virtual_year(virtual_year(year)), year);
        }
        assert_eq!(virtual_year(-1), 0);
        assert_eq!(virtual_year(1), 1);
        assert_eq!(next_year(-1), 1);
        assert_eq!(previous_year(1), -1);
        assert_eq!(next_year(-5), -4);
        assert_eq!(previous_year(10), 9);
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:    i64,
            is_leap: bool,
        }

        let cases = [
            TestCase { year: 1, is_leap: false },
            TestCase { year: 2, is_leap: false },
            TestCase { year: 3, is_leap: false },
            TestCase { year: 4, is_leap: true },
            TestCase { year: 8, is_leap: true },
            TestCase { year: 96, is_leap: true },
            TestCase { year: 100, is_leap: false },
            TestCase { year: 200, is_leap: false },
            TestCase { year: 300, is_leap: false },
            TestCase { year: 400, is_leap: true },
            TestCase { year: -1, is_leap: true },
            TestCase { year: -2, is_leap: false },
            TestCase { year: -4, is_leap: false },
            TestCase { year: -5, is_leap: true },
            TestCase { year: -9, is_leap: true },
            TestCase { year: -97, is_leap: true },
            TestCase { year: -101, is_leap: false },
            TestCase { year: -201, is_leap: false },
            TestCase { year: -301, is_leap: false },
            TestCase { year: -401, is_leap: true },
        ];

        for case in &cases {
            assert_eq!(
                GREGORIAN_RULE.is_leap_year(case.year),
                case.is_leap,
                "Year {}",
                case.year
            );
        }
    }

    #[test]
    fn test_matches_civil_calendar() {
        for year in 1..=5000 {
            assert_eq!(GREGORIAN_RULE.is_leap_year(year), civil_leap(year), "Year {year}");
            // Mirrored one year off, since there is no year 0
            assert_eq!(
                GREGORIAN_RULE.is_leap_year(-year),
                civil_leap(year - 1),
                "Year {}",
                -year
            );
        }
    }

    #[test]
    fn test_leap_years_since_known_values() {
        let cases = [
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
            (5, 1),
            (6, 1),
            (7, 1),
            (8, 1),
            (9, 2),
            (10, 2),
            (99, 24),
            (100, 24),
            (101, 24),
            (199, 48),
            (200, 48),
            (201, 48),
            (299, 72),
            (300, 72),
            (301, 72),
            (399, 96),
            (400, 96),
            (401, 97),
            (-1, 0),
            (-2, 1),
            (-3, 1),
            (-4, 1),
            (-5, 1),
            (-6, 2),
            (-7, 2),
            (-8, 2),
            (-9, 2),
            (-10, 3),
            (-96, 24),
            (-97, 24),
            (-98, 25),
            (-100, 25),
            (-101, 25),
            (-102, 25),
            (-200, 49),
            (-201, 49),
            (-202, 49),
            (-300, 73),
            (-301, 73),
            (-400, 97),
            (-401, 97),
            (-402, 98),
        ];
        for (year, expected) in cases {
            assert_eq!(GREGORIAN_RULE.leap_years_since(year), expected, "Year {year}");
        }
    }

    #[test]
    fn test_leap_years_since_matches_brute_force() {
        let rules = [
            GREGORIAN_RULE,
            LeapYearRule::every(2, 8),
            LeapYearRule::every(1, 2),
            // No `unless`, so virtual year 0 (year -1) is not a leap year
            LeapYearRule {
                month:  2,
                every:  4,
                except: 100,
                unless: 0,
            },
            LeapYearRule {
                month:  3,
                every:  3,
                except: 9,
                unless: 27,
            },
        ];
        for rule in &rules {
            let mut running = 0;
            for year in 1..=5000 {
                assert_eq!(rule.leap_years_since(year), running, "{rule:?} year {year}");
                if rule.is_leap_year(year) {
                    running += 1;
                }
            }
            let mut running = 0;
            for year in (-5000..=-1).rev() {
                assert_eq!(rule.leap_years_since(year), running, "{rule:?} year {year}");
                if rule.is_leap_year(year) {
                    running += 1;
                }
            }
            for year in [-4321, -1000, -2, 2, 1000, 4321] {
                assert_eq!(rule.leap_years_since(year), brute_force_since(rule, year));
            }
        }
    }

    #[test]
    fn test_leap_years_since_steps_by_at_most_one() {
        for year in (-5000..5000).filter(|&y| y != 0 && y != -1) {
            let step = GREGORIAN_RULE.leap_years_since(next_year(year)) - GREGORIAN_RULE.leap_years_since(year);
            if year > 0 {
                assert!((0..=1).contains(&step), "Year {year}");
            } else {
                assert!((-1..=0).contains(&step), "Year {year}");
            }
        }
    }

    #[test]
    fn test_validate_cases() {
        struct TestCase {
            rule:        LeapYearRule,
            should_pass: bool,
            description: &'static str,
        }

        let rule = |every, except, unless| LeapYearRule {
            month: 2,
            every,
            except,
            unless,
        };
        let cases = [
            TestCase {
                rule:        rule(4, 100, 400),
                should_pass: true,
                description: "gregorian rule",
            },
            TestCase {
                rule:        rule(8, 0, 0),
                should_pass: true,
                description: "simple period",
            },
            TestCase {
                rule:        rule(1, 0, 0),
                should_pass: false,
                description: "every below 2",
            },
            TestCase {
                rule:        rule(4, 4, 0),
                should_pass: false,
                description: "except not greater than every",
            },
            TestCase {
                rule:        rule(4, 10, 0),
                should_pass: false,
                description: "except not a multiple of every",
            },
            TestCase {
                rule:        rule(4, 0, 400),
                should_pass: false,
                description: "unless without except",
            },
            TestCase {
                rule:        rule(4, 100, 100),
                should_pass: false,
                description: "unless not greater than except",
            },
            TestCase {
                rule:        rule(4, 100, 250),
                should_pass: false,
                description: "unless not a multiple of except",
            },
            TestCase {
                rule:        LeapYearRule::every(13, 4),
                should_pass: false,
                description: "leap month past the last month",
            },
            TestCase {
                rule:        LeapYearRule::every(0, 4),
                should_pass: false,
                description: "leap month zero",
            },
        ];

        for case in &cases {
            assert_eq!(
                case.rule.validate(12).is_ok(),
                case.should_pass,
                "{}",
                case.description
            );
        }
        assert_eq!(
            rule(4, 0, 400).validate(12),
            Err(ValidationError::LeapUnlessWithoutExcept { unless: 400 })
        );
    }

    #[test]
    fn test_serde_skips_disabled_fields() {
        let json = serde_json::to_string(&LeapYearRule::every(2, 8)).unwrap();
        assert_eq!(json, r#"{"month":2,"every":8}"#);
        let parsed: LeapYearRule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, LeapYearRule::every(2, 8));
    }
}
