//! Occurrence expansion and time zone resolution.

mod error;
mod occurrences;
mod timezone;

pub use error::{ExpansionError, ExpansionResult};
pub use occurrences::{ExpansionOptions, ZoneContext, expand_aware, expand_naive};
pub use timezone::{TimeZoneResolver, ZoneError};
