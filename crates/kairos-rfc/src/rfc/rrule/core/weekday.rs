//! Weekdays and the packed BYDAY code.

use std::fmt;

use super::Code;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Parses a weekday from a two-letter abbreviation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SU" => Self::Sunday,
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            _ => return None,
        })
    }

    /// Day number with Sunday as 1 and Saturday as 7.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Sunday => 1,
            Self::Monday => 2,
            Self::Tuesday => 3,
            Self::Wednesday => 4,
            Self::Thursday => 5,
            Self::Friday => 6,
            Self::Saturday => 7,
        }
    }

    /// Inverse of [`Weekday::number`].
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        Some(match n {
            1 => Self::Sunday,
            2 => Self::Monday,
            3 => Self::Tuesday,
            4 => Self::Wednesday,
            5 => Self::Thursday,
            6 => Self::Friday,
            7 => Self::Saturday,
            _ => return None,
        })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Week start is stored as 0 when absent.
impl Code for Option<Weekday> {
    fn to_code(self) -> i32 {
        self.map_or(0, |day| i32::from(day.number()))
    }

    fn from_code(code: i32) -> Option<Self> {
        if code == 0 {
            return Some(None);
        }
        let n = u8::try_from(code).ok()?;
        Weekday::from_number(n).map(Some)
    }
}

/// Weekday with optional occurrence number.
///
/// Used in BYDAY rule part. Examples:
/// - `MO` - every Monday
/// - `1MO` - first Monday of the month/year
/// - `-1FR` - last Friday of the month/year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    /// Optional occurrence number (-53 to 53, excluding 0).
    pub ordinal: Option<i8>,
    /// The day of the week.
    pub weekday: Weekday,
}

/// Largest BYDAY ordinal magnitude.
pub const MAX_WEEKDAY_ORDINAL: i8 = 53;

impl WeekdayNum {
    /// Creates a weekday occurrence without an ordinal.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    /// Creates a weekday occurrence with an ordinal, or `None` when the
    /// ordinal is 0 or outside -53..=53.
    #[must_use]
    pub fn nth(ordinal: i8, weekday: Weekday) -> Option<Self> {
        (ordinal != 0 && (-MAX_WEEKDAY_ORDINAL..=MAX_WEEKDAY_ORDINAL).contains(&ordinal)).then_some(
            Self {
                ordinal: Some(ordinal),
                weekday,
            },
        )
    }

    /// Packs into the slot code `(|ordinal| * 8 + day) * sign(ordinal)`.
    #[must_use]
    pub fn code(self) -> i16 {
        let day = i16::from(self.weekday.number());
        match self.ordinal {
            None => day,
            Some(n) => {
                let magnitude = i16::from(n.unsigned_abs()) * 8 + day;
                if n < 0 { -magnitude } else { magnitude }
            }
        }
    }

    /// Unpacks a slot code, rejecting unknown days and out-of-range ordinals.
    #[must_use]
    pub fn from_code(code: i16) -> Option<Self> {
        let magnitude = code.unsigned_abs();
        let weekday = Weekday::from_number(u8::try_from(magnitude % 8).ok()?)?;
        let position = i8::try_from(magnitude / 8).ok()?;
        if position == 0 {
            return (code > 0).then_some(Self::every(weekday));
        }
        Self::nth(if code < 0 { -position } else { position }, weekday)
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.ordinal {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.weekday)
    }
}
