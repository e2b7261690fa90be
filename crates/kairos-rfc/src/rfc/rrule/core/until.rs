//! UNTIL bound of a recurrence.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike, Utc,
};

/// Inclusive end of a recurrence, either a DATE or a UTC DATE-TIME.
///
/// A date-only bound keeps midnight as its time component; the `is_date`
/// flag takes part in ordering and equality.
#[derive(Debug, Clone, Copy)]
pub struct Until {
    at: NaiveDateTime,
    is_date: bool,
}

impl Until {
    /// Date-only bound.
    #[must_use]
    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            at: date.and_time(NaiveTime::MIN),
            is_date: true,
        }
    }

    /// Date-time bound in UTC wall time. Sub-second precision is dropped.
    #[must_use]
    pub fn at(date_time: NaiveDateTime) -> Self {
        Self {
            at: date_time.with_nanosecond(0).unwrap_or(date_time),
            is_date: false,
        }
    }

    /// Rebuilds a bound from broken-down fields, rejecting impossible dates
    /// and date-only bounds carrying a time of day.
    #[must_use]
    pub fn from_fields(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        is_date: bool,
    ) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        if is_date {
            return (hour == 0 && minute == 0 && second == 0).then(|| Self::on_date(date));
        }
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;
        Some(Self::at(date.and_time(time)))
    }

    /// Wall time of the bound, midnight for a date-only bound.
    #[must_use]
    pub const fn naive(&self) -> NaiveDateTime {
        self.at
    }

    #[must_use]
    pub const fn is_date(&self) -> bool {
        self.is_date
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.at.date()
    }

    /// Last instant covered by the bound when iterating in UTC.
    #[must_use]
    pub fn inclusive_end(&self) -> DateTime<Utc> {
        self.inclusive_end_in(&Utc)
    }

    /// Last instant covered by the bound when iterating in `tz`.
    ///
    /// A date-only bound covers its whole local day, up to one second before
    /// the next local midnight. A date-time bound is already UTC.
    #[must_use]
    pub fn inclusive_end_in<Z: TimeZone>(&self, tz: &Z) -> DateTime<Utc> {
        if !self.is_date {
            return self.at.and_utc();
        }
        let Some(next_day) = self.at.date().succ_opt() else {
            let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
            return self.at.date().and_time(end_of_day).and_utc();
        };
        let midnight = next_day.and_time(NaiveTime::MIN);
        // midnight can fall in a DST gap
        let next_start = tz
            .from_local_datetime(&midnight)
            .earliest()
            .or_else(|| tz.from_local_datetime(&(midnight + TimeDelta::hours(1))).earliest())
            .map_or_else(|| midnight.and_utc(), |dt| dt.with_timezone(&Utc));
        next_start - TimeDelta::seconds(1)
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.at.year()
    }

    /// Month, day, hour, minute and second, in that order.
    #[must_use]
    pub fn clock_fields(&self) -> [u32; 5] {
        [
            self.at.month(),
            self.at.day(),
            self.at.hour(),
            self.at.minute(),
            self.at.second(),
        ]
    }
}

impl Ord for Until {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at
            .cmp(&other.at)
            .then(self.is_date.cmp(&other.is_date))
    }
}

impl PartialOrd for Until {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Until {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Until {}

impl Hash for Until {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.at.hash(state);
        self.is_date.hash(state);
    }
}
