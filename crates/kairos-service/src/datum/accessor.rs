//! Field accessors over stored values.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use kairos_rfc::rfc::rrule::stored::decode;
use kairos_rfc::rfc::rrule::{ByPart, Codes, Frequency, Weekday};

use crate::error::ServiceResult;
use crate::session::Session;

/// ## Summary
/// Frequency of the rule, `None` when it has none.
///
/// ## Errors
/// Returns a storage error if the buffer is corrupt.
pub fn frequency(stored: &[u8]) -> ServiceResult<Option<Frequency>> {
    Ok(decode(stored)?.frequency())
}

/// ## Summary
/// UNTIL as a UTC wall time; midnight for a date-only bound.
///
/// ## Errors
/// Returns a storage error if the buffer is corrupt.
pub fn until(stored: &[u8]) -> ServiceResult<Option<NaiveDateTime>> {
    Ok(decode(stored)?.until().map(|until| until.naive()))
}

/// ## Summary
/// UNTIL wall time read in the session zone.
///
/// A wall time skipped by a DST gap is shifted forward by one hour; an
/// ambiguous one takes its first occurrence.
///
/// ## Errors
/// Returns a storage error if the buffer is corrupt.
pub fn until_tz(stored: &[u8], session: &Session) -> ServiceResult<Option<DateTime<Utc>>> {
    let Some(until) = decode(stored)?.until() else {
        return Ok(None);
    };
    let tz = session.resolve_zone();
    let local = until.naive();
    let instant = tz
        .from_local_datetime(&local)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(local + Duration::hours(1))).earliest())
        .map_or_else(|| local.and_utc(), |dt| dt.with_timezone(&Utc));
    Ok(Some(instant))
}

/// ## Summary
/// COUNT of the rule, if set.
///
/// ## Errors
/// Returns a storage error if the buffer is corrupt.
pub fn count(stored: &[u8]) -> ServiceResult<Option<i32>> {
    Ok(decode(stored)?.count())
}

/// ## Summary
/// INTERVAL of the rule.
///
/// ## Errors
/// Returns a storage error if the buffer is corrupt.
pub fn interval(stored: &[u8]) -> ServiceResult<u16> {
    Ok(decode(stored)?.interval())
}

/// ## Summary
/// WKST of the rule, `None` when unset.
///
/// ## Errors
/// Returns a storage error if the buffer is corrupt.
pub fn week_start(stored: &[u8]) -> ServiceResult<Option<Weekday>> {
    Ok(decode(stored)?.week_start())
}

/// ## Summary
/// Every code recorded in a BY* part, empty when the part is absent.
///
/// ## Errors
/// Returns a storage error if the buffer is corrupt.
pub fn by_part(stored: &[u8], part: ByPart) -> ServiceResult<Vec<i16>> {
    Ok(decode(stored)?
        .by(part)
        .map(Codes::to_vec)
        .unwrap_or_default())
}

macro_rules! by_part_accessor {
    ($($name:ident => $part:ident),* $(,)?) => {
        $(
            #[doc = concat!("Codes of `", stringify!($part), "`; see [`by_part`].")]
            ///
            /// ## Errors
            /// Returns a storage error if the buffer is corrupt.
            pub fn $name(stored: &[u8]) -> ServiceResult<Vec<i16>> {
                by_part(stored, ByPart::$part)
            }
        )*
    };
}

by_part_accessor! {
    by_second => Second,
    by_minute => Minute,
    by_hour => Hour,
    by_day => Day,
    by_month_day => MonthDay,
    by_year_day => YearDay,
    by_week_no => WeekNo,
    by_month => Month,
    by_set_pos => SetPos,
}
