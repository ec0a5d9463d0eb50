/// Layout for the full form, e.g. "Friday, September 22, 2017"
pub const FULL_FORMAT: &str = "%W, %M %D, %Y";
/// Layout for the long form, e.g. "September 22, 2017"
pub const LONG_FORMAT: &str = "%M %D, %Y";
/// Layout for the medium form, e.g. "Sep 22, 2017"
pub const MEDIUM_FORMAT: &str = "%m %D, %Y";
/// Layout for the short form, e.g. "9/22/2017". This is also the
/// canonical text form used by `Display` and serde.
pub const SHORT_FORMAT: &str = "%N/%D/%Y";

/// Character that introduces a layout directive
pub const DIRECTIVE_MARKER: char = '%';

/// Number of characters kept when abbreviating weekday and month names
pub const ABBREVIATION_LENGTH: usize = 3;

/// The first year of the day-count epoch. Day-count 0 is day 1 of this year.
pub const EPOCH_YEAR: i64 = 1;
/// Largest day-count a `Date` holds. Later day-counts are clamped to it,
/// which keeps every year and year start within `i64`.
pub const MAX_DAY_COUNT: i64 = i64::MAX / 2;
/// Smallest day-count a `Date` holds
pub const MIN_DAY_COUNT: i64 = -MAX_DAY_COUNT;
/// First month of a year (months are 1-indexed)
pub const FIRST_MONTH: usize = 1;
/// First day of a month or year (days are 1-indexed)
pub const FIRST_DAY: u32 = 1;

/// Era of the Pathfinder Absalom Reckoning calendar
pub const ABSALOM_RECKONING_ERA: &str = "AR";
/// Era of the Pathfinder Imperial Calendar
pub const IMPERIAL_CALENDAR_ERA: &str = "IC";
/// Years between the start of Absalom Reckoning and the Imperial Calendar
pub const IMPERIAL_YEAR_OFFSET: i64 = 2500;

/// Sides assumed when a dice spec has a 'd' but no sides value
pub const DEFAULT_DICE_SIDES: u32 = 6;
