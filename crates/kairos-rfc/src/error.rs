use thiserror::Error;

use crate::rfc::rrule::{ExpansionError, ParseError, StorageError, ValueError, WireError};

/// Errors raised by the recurrence value layer.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    CoreError(#[from] kairos_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
