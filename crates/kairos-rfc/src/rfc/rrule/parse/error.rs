//! RRULE text parsing error types.

use std::fmt;

/// Result type for RRULE parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type for RRULE parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Kind of error.
    pub kind: ParseErrorKind,
    /// Column where the offending rule part starts (1-based).
    pub column: usize,
    /// The rule text that failed to parse.
    pub input: String,
    /// Additional context about the error.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, column: usize) -> Self {
        Self {
            kind,
            column,
            input: String::new(),
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Records the full rule text for the message.
    #[must_use]
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "can't parse RRULE {:?}: {} at column {}", self.input, self.kind, self.column)?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {ctx}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Kinds of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Empty rule text.
    Empty,
    /// Rule text starts with the `RRULE:` property name.
    PropertyPrefix,
    /// Rule part without `=`.
    MissingEquals,
    /// Unrecognized rule part name.
    UnknownPart,
    /// Rule part given more than once.
    DuplicatePart,
    /// No FREQ part.
    MissingFrequency,
    /// Invalid frequency.
    InvalidFrequency,
    /// INTERVAL not a positive 16-bit number.
    InvalidInterval,
    /// COUNT not a positive number.
    InvalidCount,
    /// UNTIL neither DATE nor DATE-TIME.
    InvalidUntil,
    /// UNTIL and COUNT are mutually exclusive.
    UntilCountConflict,
    /// Invalid weekday.
    InvalidWeekday,
    /// List entry is not a number.
    InvalidNumber,
    /// List entry outside the range of its part.
    OutOfRange,
    /// More list entries than the part can hold.
    TooManyValues,
    /// RSCALE empty or not printable.
    InvalidRscale,
    /// Unknown SKIP mode.
    InvalidSkip,
    /// SKIP given without RSCALE (RFC 7529 §4.1).
    SkipWithoutRscale,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty recurrence rule"),
            Self::PropertyPrefix => write!(
                f,
                "unexpected property name, omit the \"RRULE:\" part"
            ),
            Self::MissingEquals => write!(f, "missing '=' in rule part"),
            Self::UnknownPart => write!(f, "unknown rule part"),
            Self::DuplicatePart => write!(f, "duplicate rule part"),
            Self::MissingFrequency => write!(f, "missing FREQ"),
            Self::InvalidFrequency => write!(f, "invalid frequency"),
            Self::InvalidInterval => write!(f, "invalid interval"),
            Self::InvalidCount => write!(f, "invalid count"),
            Self::InvalidUntil => write!(f, "invalid until"),
            Self::UntilCountConflict => write!(f, "UNTIL and COUNT are mutually exclusive"),
            Self::InvalidWeekday => write!(f, "invalid weekday"),
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::OutOfRange => write!(f, "value out of range"),
            Self::TooManyValues => write!(f, "too many values"),
            Self::InvalidRscale => write!(f, "invalid calendar scale"),
            Self::InvalidSkip => write!(f, "invalid skip mode"),
            Self::SkipWithoutRscale => write!(f, "SKIP requires RSCALE"),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
