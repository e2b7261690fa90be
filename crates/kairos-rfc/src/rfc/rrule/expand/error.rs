use thiserror::Error;

use crate::rfc::rrule::core::Skip;

/// Errors raised while expanding a recurrence into occurrences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    #[error("Recurrence has no frequency")]
    NoRecurrence,

    #[error("Calendar scale {0:?} is not supported for expansion")]
    UnsupportedCalendar(String),

    #[error("SKIP={0} is not supported for expansion")]
    UnsupportedSkip(Skip),

    #[error("Recurrence has neither COUNT nor UNTIL and no end bound was given")]
    Unbounded,

    #[error("Recurrence engine rejected the rule: {0}")]
    Engine(String),

    #[error("Expansion produced more than {0} occurrences")]
    TooManyOccurrences(usize),
}

pub type ExpansionResult<T> = std::result::Result<T, ExpansionError>;
