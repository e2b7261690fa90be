//! RRULE text parsing.

mod error;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use values::parse_recurrence;

use std::str::FromStr;

use crate::rfc::rrule::core::Recurrence;

impl FromStr for Recurrence<'static> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_recurrence(s)
    }
}
