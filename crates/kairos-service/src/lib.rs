//! Host-facing glue for stored recurrence values.

pub mod datum;
pub mod error;
pub mod session;
