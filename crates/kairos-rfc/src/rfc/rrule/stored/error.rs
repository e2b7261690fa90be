use thiserror::Error;

use crate::rfc::rrule::core::ValueError;

/// Errors raised while building or reading a stored recurrence buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error(transparent)]
    InvalidValue(#[from] ValueError),

    #[error("Stored recurrence of {size} bytes exceeds the {max} byte limit")]
    EncodingOverflow { size: usize, max: usize },

    #[error("Invalid offset {offset} for {field} in a {region} byte variable region")]
    InvalidOffset {
        field: &'static str,
        offset: u32,
        region: usize,
    },

    #[error("Corrupt stored recurrence: {0}")]
    CorruptBuffer(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
