//! Recurrence frequency and RFC 7529 skip behaviour.

use std::fmt;

use super::Code;

/// Recurrence frequency (RFC 5545 §3.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Code of the "no recurrence" frequency.
pub const NO_FREQUENCY_CODE: i32 = 7;

impl Frequency {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Self::Secondly,
            "MINUTELY" => Self::Minutely,
            "HOURLY" => Self::Hourly,
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Code for Option<Frequency> {
    fn to_code(self) -> i32 {
        match self {
            Some(Frequency::Secondly) => 0,
            Some(Frequency::Minutely) => 1,
            Some(Frequency::Hourly) => 2,
            Some(Frequency::Daily) => 3,
            Some(Frequency::Weekly) => 4,
            Some(Frequency::Monthly) => 5,
            Some(Frequency::Yearly) => 6,
            None => NO_FREQUENCY_CODE,
        }
    }

    fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Some(Frequency::Secondly),
            1 => Some(Frequency::Minutely),
            2 => Some(Frequency::Hourly),
            3 => Some(Frequency::Daily),
            4 => Some(Frequency::Weekly),
            5 => Some(Frequency::Monthly),
            6 => Some(Frequency::Yearly),
            NO_FREQUENCY_CODE => None,
            _ => return None,
        })
    }
}

/// Handling of invalid dates produced by a non-Gregorian `RSCALE`
/// (RFC 7529 §3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Skip {
    Backward,
    Forward,
    #[default]
    Omit,
}

impl Skip {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backward => "BACKWARD",
            Self::Forward => "FORWARD",
            Self::Omit => "OMIT",
        }
    }

    /// Parses a skip mode from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "BACKWARD" => Self::Backward,
            "FORWARD" => Self::Forward,
            "OMIT" => Self::Omit,
            _ => return None,
        })
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Code for Skip {
    fn to_code(self) -> i32 {
        match self {
            Self::Backward => 0,
            Self::Forward => 1,
            Self::Omit => 2,
        }
    }

    fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Backward,
            1 => Self::Forward,
            2 => Self::Omit,
            _ => return None,
        })
    }
}
