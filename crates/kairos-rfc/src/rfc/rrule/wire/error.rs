use thiserror::Error;

use crate::rfc::rrule::core::{ByPart, ValueError};

/// Errors raised by the wire codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error(transparent)]
    InvalidValue(#[from] ValueError),

    #[error("Wire stream truncated: needed {needed} bytes at position {at}")]
    Truncated { at: usize, needed: usize },

    #[error("{part} length {len} is negative or exceeds capacity {capacity}")]
    InvalidSlotLength {
        part: ByPart,
        len: i16,
        capacity: usize,
    },

    #[error("Invalid RSCALE length {0}")]
    InvalidRscaleLength(i32),

    #[error("RSCALE is not valid UTF-8")]
    InvalidUtf8,

    #[error("Unknown {field} code {code}")]
    UnknownCode { field: &'static str, code: i32 },

    #[error("Invalid UNTIL fields {0:?}")]
    InvalidUntil([i32; 7]),

    #[error("Rule too large for the wire format: {0}")]
    Oversized(&'static str),

    #[error("{0} trailing bytes after the wire value")]
    TrailingBytes(usize),
}

pub type WireResult<T> = std::result::Result<T, WireError>;
