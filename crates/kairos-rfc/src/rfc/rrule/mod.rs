//! RFC 5545 recurrence rules with the RFC 7529 calendar scale extensions.

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;
pub mod stored;
pub mod wire;


pub use build::engine_rule;
pub use self::core::{
    ByPart, ByParts, Code, Codes, Frequency, Recurrence, Skip, Until, ValueError, Weekday,
    WeekdayNum,
};
pub use expand::{ExpansionError, ExpansionOptions, ZoneContext, expand_aware, expand_naive};
pub use parse::{ParseError, ParseErrorKind, parse_recurrence};
pub use stored::{StorageError, StorageLimits, StoredRecurrence};
pub use wire::WireError;
