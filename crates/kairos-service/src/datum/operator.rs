//! Comparison operators over stored values.

use kairos_rfc::rfc::rrule::stored::decode;

use crate::error::ServiceResult;

/// ## Summary
/// True when both buffers hold the same recurrence.
///
/// ## Errors
/// Returns a storage error if either buffer is corrupt.
pub fn eq(left: &[u8], right: &[u8]) -> ServiceResult<bool> {
    Ok(decode(left)? == decode(right)?)
}

/// ## Summary
/// Negation of [`eq`].
///
/// ## Errors
/// Returns a storage error if either buffer is corrupt.
pub fn ne(left: &[u8], right: &[u8]) -> ServiceResult<bool> {
    eq(left, right).map(|equal| !equal)
}
