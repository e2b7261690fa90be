//! Text and binary input/output of stored values.

use kairos_rfc::rfc::rrule::{StoredRecurrence, parse_recurrence, wire};

use crate::error::ServiceResult;
use crate::session::Session;

/// ## Summary
/// Parses RRULE text into a stored value.
///
/// ## Errors
/// Returns a parse error for malformed text and a storage error if the
/// value exceeds the session's buffer limit.
pub fn input(text: &str, session: &Session) -> ServiceResult<StoredRecurrence> {
    let rule = parse_recurrence(text)?;
    let stored = StoredRecurrence::encode(&rule, session.limits())?;
    tracing::debug!(rule = %rule, size = stored.len(), "Stored recurrence from text");
    Ok(stored)
}

/// ## Summary
/// Renders a stored value as canonical RRULE text.
///
/// ## Errors
/// Returns a storage error if the buffer is corrupt.
pub fn output(stored: &[u8]) -> ServiceResult<String> {
    let rule = kairos_rfc::rfc::rrule::stored::decode(stored)?;
    Ok(rule.to_string())
}

/// ## Summary
/// Serializes a stored value into the wire form.
///
/// ## Errors
/// Returns a storage error if the buffer is corrupt.
pub fn send(stored: &[u8]) -> ServiceResult<Vec<u8>> {
    let rule = kairos_rfc::rfc::rrule::stored::decode(stored)?;
    Ok(wire::encode(&rule)?)
}

/// ## Summary
/// Reads a wire value into a freshly stored value.
///
/// ## Errors
/// Returns a wire error for a malformed stream and a storage error if the
/// value exceeds the session's buffer limit.
pub fn receive(bytes: &[u8], session: &Session) -> ServiceResult<StoredRecurrence> {
    let rule = wire::decode(bytes)?;
    Ok(StoredRecurrence::encode(&rule, session.limits())?)
}
