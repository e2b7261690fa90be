/// Naming constants shared across crates
pub const APP_NAME: &str = "kairos";
pub const CONFIG_FILE_NAME: &str = const_str::concat!(APP_NAME, ".toml");
pub const ENV_PREFIX: &str = "KAIROS";

/// Maximum number of codes each by-part slot may hold.
///
/// Values are one past the largest legal entry count for the matching
/// RRULE part (e.g. 60 seconds plus a leap second).
pub const BY_SECOND_CAPACITY: usize = 61;
pub const BY_MINUTE_CAPACITY: usize = 61;
pub const BY_HOUR_CAPACITY: usize = 25;
pub const BY_DAY_CAPACITY: usize = 8;
pub const BY_MONTH_DAY_CAPACITY: usize = 32;
pub const BY_YEAR_DAY_CAPACITY: usize = 367;
pub const BY_WEEK_NO_CAPACITY: usize = 54;
pub const BY_MONTH_CAPACITY: usize = 13;
pub const BY_SET_POS_CAPACITY: usize = 367;

/// Capacities in canonical slot order: second, minute, hour, day, month-day,
/// year-day, week-no, month, set-pos.
pub const BY_PART_CAPACITIES: [usize; 9] = [
    BY_SECOND_CAPACITY,
    BY_MINUTE_CAPACITY,
    BY_HOUR_CAPACITY,
    BY_DAY_CAPACITY,
    BY_MONTH_DAY_CAPACITY,
    BY_YEAR_DAY_CAPACITY,
    BY_WEEK_NO_CAPACITY,
    BY_MONTH_CAPACITY,
    BY_SET_POS_CAPACITY,
];

/// Largest stored buffer the host runtime accepts (1 GiB - 1).
pub const DEFAULT_MAX_STORED_SIZE: usize = 0x3FFF_FFFF;

/// Default cap on occurrences produced by a single expansion call.
pub const DEFAULT_MAX_OCCURRENCES: usize = 10_000;

/// Hard ceiling for `expansion.max_occurrences`; the iterator limit is a `u16`
/// and one extra slot is needed to detect overflow.
pub const MAX_OCCURRENCES_CEILING: usize = 65_534;

pub const DEFAULT_SESSION_TIMEZONE: &str = "UTC";
pub const DEFAULT_LOG_LEVEL: &str = "debug";

/// Calendar scale the occurrence engine understands.
pub const GREGORIAN_RSCALE: &str = "GREGORIAN";
