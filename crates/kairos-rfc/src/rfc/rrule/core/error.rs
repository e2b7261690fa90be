//! Invariant violations of an in-memory recurrence value.

use thiserror::Error;

use super::ByPart;

/// A value that cannot be stored or transmitted as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("{part} holds {len} entries, capacity is {capacity}")]
    CapacityExceeded {
        part: ByPart,
        len: usize,
        capacity: usize,
    },

    #[error("COUNT must be positive, got {0}")]
    NonPositiveCount(i32),

    #[error("INTERVAL must be positive")]
    ZeroInterval,

    #[error("RSCALE must not be empty")]
    EmptyRscale,

    #[error("RSCALE {0:?} contains non-printable characters")]
    NonPrintableRscale(String),
}
