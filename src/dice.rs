//! Dice notation: `[count]d[sides][+/-modifier][x multiplier]`.
//!
//! ```
//! use rpgtools::dice::{Dice, DiceConfig};
//!
//! let dice: Dice = "3d6+2".parse().unwrap();
//! assert_eq!((dice.minimum(), dice.average(), dice.maximum()), (5, 12, 20));
//!
//! let gurps = Dice::parse_with("1d6+8", DiceConfig::gurps().with_extra_dice()).unwrap();
//! assert_eq!(gurps.to_string(), "3d+1");
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_DICE_SIDES;

#[allow(clippy::expect_used)]
static DICE_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([0-9]+)?\s*d\s*([0-9]+)?(?:\s*([+-])\s*([0-9]+))?(?:\s*x\s*([0-9]+))?")
        .expect("dice pattern")
});

#[allow(clippy::expect_used)]
static CONSTANT_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([+-]?[0-9]+)(?:\s*x\s*([0-9]+))?").expect("constant pattern")
});

#[allow(clippy::expect_used)]
static EMBEDDED_DICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:[0-9]+d[0-9]*|d[0-9]+)(?:\s*[+-]\s*[0-9]+)?(?:\s*x\s*[0-9]+)?")
        .expect("embedded dice pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("Invalid dice specification: {0:?}")]
    InvalidSpec(String),
}

fn number(spec: &str, digits: Option<regex::Match<'_>>, default: u32) -> Result<u32, DiceError> {
    digits.map_or(Ok(default), |m| {
        m.as_str()
            .parse()
            .map_err(|_| DiceError::InvalidSpec(spec.to_owned()))
    })
}

/// A source of uniformly distributed integers.
pub trait Randomizer {
    /// Returns a value in `[0, n)`. `n` must be positive.
    fn intn(&mut self, n: u32) -> u32;
}

impl<R: rand::Rng> Randomizer for R {
    fn intn(&mut self, n: u32) -> u32 {
        self.gen_range(0..n)
    }
}

/// How dice are displayed and whether large modifiers become extra dice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceConfig {
    /// Always show the count and hide six sides, e.g. "1d" rather than "d6".
    pub gurps_format:              bool,
    /// Turn a modifier at or above the average of a die into extra dice, so
    /// that 1d6+8 becomes 3d6+1.
    pub extra_dice_from_modifiers: bool,
}

impl DiceConfig {
    pub const fn gurps() -> Self {
        Self {
            gurps_format:              true,
            extra_dice_from_modifiers: false,
        }
    }

    #[must_use]
    pub const fn with_extra_dice(mut self) -> Self {
        self.extra_dice_from_modifiers = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dice {
    pub count:      u32,
    pub sides:      u32,
    pub modifier:   i64,
    pub multiplier: u32,
    pub config:     DiceConfig,
}

impl Dice {
    pub const fn new(count: u32, sides: u32, modifier: i64, multiplier: u32) -> Self {
        Self {
            count,
            sides,
            modifier,
            multiplier: if multiplier == 0 { 1 } else { multiplier },
            config: DiceConfig {
                gurps_format:              false,
                extra_dice_from_modifiers: false,
            },
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: DiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses the first dice expression in `spec`. A 'd' without sides
    /// means six sides, sides without a count means one die, and a bare
    /// number is a constant. An expression starts at a word boundary, so a
    /// 'd' inside a word such as "and" is not a die.
    ///
    /// # Errors
    /// Returns `DiceError::InvalidSpec` when `spec` holds neither dice nor a
    /// number, or a number does not fit.
    pub fn parse_with(spec: &str, config: DiceConfig) -> Result<Self, DiceError> {
        if let Some(caps) = DICE_SPEC.captures(spec) {
            let count = number(spec, caps.get(1), 1)?;
            let sides = number(spec, caps.get(2), DEFAULT_DICE_SIDES)?;
            let mut modifier = i64::from(number(spec, caps.get(4), 0)?);
            if caps.get(3).is_some_and(|sign| sign.as_str() == "-") {
                modifier = -modifier;
            }
            let multiplier = number(spec, caps.get(5), 1)?;
            return Ok(Self::new(count, sides, modifier, multiplier).with_config(config));
        }

        if let Some(caps) = CONSTANT_SPEC.captures(spec) {
            let modifier = caps[1]
                .parse::<i64>()
                .map_err(|_| DiceError::InvalidSpec(spec.to_owned()))?;
            let multiplier = number(spec, caps.get(2), 1)?;
            return Ok(Self::new(0, 0, modifier, multiplier).with_config(config));
        }

        Err(DiceError::InvalidSpec(spec.to_owned()))
    }

    /// Count and modifier after converting large modifiers into dice, when
    /// `extra` is set.
    fn adjusted(&self, extra: bool) -> (i64, i64) {
        let mut count = i64::from(self.count);
        let mut modifier = self.modifier;
        if self.sides == 0 || !extra || modifier <= 0 {
            return (count, modifier);
        }
        let sides = i64::from(self.sides);
        let average = (sides + 1) / 2;
        if sides % 2 == 1 {
            count += modifier / average;
            modifier %= average;
        } else {
            // The true average of an even die ends in a half, so every
            // second extra die costs one more point.
            while modifier > average {
                if modifier > 2 * average {
                    modifier -= 2 * average + 1;
                    count += 2;
                } else {
                    modifier -= average + 1;
                    count += 1;
                }
            }
        }
        (count, modifier)
    }

    fn counts(&self) -> (i64, i64) {
        self.adjusted(self.config.extra_dice_from_modifiers)
    }

    pub fn minimum(&self) -> i64 {
        let (count, modifier) = self.counts();
        let dice = if self.sides > 0 { count } else { 0 };
        (modifier + dice) * i64::from(self.multiplier)
    }

    pub fn average(&self) -> i64 {
        let (count, modifier) = self.counts();
        let dice = if self.sides > 0 {
            count * (i64::from(self.sides) + 1) / 2
        } else {
            0
        };
        (modifier + dice) * i64::from(self.multiplier)
    }

    pub fn maximum(&self) -> i64 {
        let (count, modifier) = self.counts();
        (modifier + count * i64::from(self.sides)) * i64::from(self.multiplier)
    }

    pub fn roll<R: Randomizer + ?Sized>(&self, rng: &mut R) -> i64 {
        let (count, mut result) = self.counts();
        match self.sides {
            0 => {}
            1 => result += count,
            sides => {
                for _ in 0..count {
                    result += 1 + i64::from(rng.intn(sides));
                }
            }
        }
        let total = result * i64::from(self.multiplier);
        tracing::trace!(dice = %self, total, "rolled");
        total
    }

    /// Rolls with the thread-local generator.
    pub fn roll_random(&self) -> i64 {
        self.roll(&mut rand::thread_rng())
    }

    /// Chance that at least one die of the pool shows `target` or higher.
    pub fn pool_probability(&self, target: u32) -> f64 {
        let target = target.max(1);
        if self.count < 1 || self.sides < target {
            return 0.0;
        }
        let sides = f64::from(self.sides);
        let miss = 1.0 - f64::from(1 + self.sides - target) / sides;
        let count = i32::try_from(self.count).unwrap_or(i32::MAX);
        1.0 - miss.powi(count)
    }

    /// Makes the extra dice conversion permanent.
    pub fn apply_extra_dice_from_modifiers(&mut self) {
        let (count, modifier) = self.adjusted(true);
        self.count = u32::try_from(count).unwrap_or(u32::MAX);
        self.modifier = modifier;
    }

    fn write_spec(&self, f: &mut fmt::Formatter<'_>, config: DiceConfig) -> fmt::Result {
        let (count, modifier) = self.adjusted(config.extra_dice_from_modifiers);
        let mut empty = true;
        if count > 0 {
            if config.gurps_format || count > 1 {
                write!(f, "{count}")?;
            }
            f.write_str("d")?;
            if !config.gurps_format || self.sides != DEFAULT_DICE_SIDES {
                write!(f, "{}", self.sides)?;
            }
            empty = false;
        }
        if modifier > 0 && !empty && self.sides != 0 {
            write!(f, "+{modifier}")?;
        } else if modifier != 0 {
            write!(f, "{modifier}")?;
        } else if empty {
            f.write_str("0")?;
        }
        if self.multiplier != 1 {
            write!(f, "x{}", self.multiplier)?;
        }
        Ok(())
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new(1, DEFAULT_DICE_SIDES, 0, 1)
    }
}

impl FromStr for Dice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, DiceConfig::default())
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_spec(f, self.config)
    }
}

/// Plain notation without display options, so the numbers survive a round
/// trip unchanged.
struct Canonical<'a>(&'a Dice);

impl fmt::Display for Canonical<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_spec(f, DiceConfig::default())
    }
}

impl Serialize for Dice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&Canonical(self))
    }
}

impl<'de> Deserialize<'de> for Dice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Byte ranges of every dice expression embedded in `text`.
pub fn extract_dice_positions(text: &str) -> Vec<Range<usize>> {
    EMBEDDED_DICE.find_iter(text).map(|m| m.range()).collect()
}

/// Byte range of the first dice expression embedded in `text`.
pub fn extract_first_dice_position(text: &str) -> Option<Range<usize>> {
    EMBEDDED_DICE.find(text).map(|m| m.range())
}
