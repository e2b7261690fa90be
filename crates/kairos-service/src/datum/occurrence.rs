//! Occurrence queries over stored values.

use chrono::{DateTime, NaiveDateTime, Utc};
use kairos_rfc::rfc::rrule::stored::decode;
use kairos_rfc::rfc::rrule::{expand_aware, expand_naive};

use crate::error::ServiceResult;
use crate::session::Session;

/// ## Summary
/// Occurrences from `start`, iterated in the session zone.
///
/// ## Errors
/// Returns a storage error for a corrupt buffer and an expansion error for
/// an unbounded rule or too many occurrences.
pub fn occurrences_tz(
    stored: &[u8],
    start: DateTime<Utc>,
    session: &Session,
) -> ServiceResult<Vec<DateTime<Utc>>> {
    let rule = decode(stored)?;
    Ok(expand_aware(
        &rule,
        start,
        None,
        &session.zone(),
        session.expansion(),
    )?)
}

/// ## Summary
/// Occurrences from `start` up to and including `end`, iterated in the
/// session zone.
///
/// ## Errors
/// Same as [`occurrences_tz`], except that an unbounded rule is accepted.
pub fn occurrences_tz_until(
    stored: &[u8],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    session: &Session,
) -> ServiceResult<Vec<DateTime<Utc>>> {
    let rule = decode(stored)?;
    Ok(expand_aware(
        &rule,
        start,
        Some(end),
        &session.zone(),
        session.expansion(),
    )?)
}

/// ## Summary
/// Occurrences from a zone-less `start`.
///
/// ## Errors
/// Same as [`occurrences_tz`].
pub fn occurrences(
    stored: &[u8],
    start: NaiveDateTime,
    session: &Session,
) -> ServiceResult<Vec<NaiveDateTime>> {
    let rule = decode(stored)?;
    Ok(expand_naive(&rule, start, None, session.expansion())?)
}

/// ## Summary
/// Occurrences from a zone-less `start` up to and including `end`.
///
/// ## Errors
/// Same as [`occurrences_tz_until`].
pub fn occurrences_until(
    stored: &[u8],
    start: NaiveDateTime,
    end: NaiveDateTime,
    session: &Session,
) -> ServiceResult<Vec<NaiveDateTime>> {
    let rule = decode(stored)?;
    Ok(expand_naive(&rule, start, Some(end), session.expansion())?)
}
