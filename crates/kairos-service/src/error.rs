use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RfcError(#[from] kairos_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] kairos_core::error::CoreError),
}

impl From<kairos_rfc::rfc::rrule::ParseError> for ServiceError {
    fn from(e: kairos_rfc::rfc::rrule::ParseError) -> Self {
        Self::RfcError(e.into())
    }
}

impl From<kairos_rfc::rfc::rrule::StorageError> for ServiceError {
    fn from(e: kairos_rfc::rfc::rrule::StorageError) -> Self {
        Self::RfcError(e.into())
    }
}

impl From<kairos_rfc::rfc::rrule::WireError> for ServiceError {
    fn from(e: kairos_rfc::rfc::rrule::WireError) -> Self {
        Self::RfcError(e.into())
    }
}

impl From<kairos_rfc::rfc::rrule::ExpansionError> for ServiceError {
    fn from(e: kairos_rfc::rfc::rrule::ExpansionError) -> Self {
        Self::RfcError(e.into())
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
