//! RRULE recurrence values: grammar, relocatable storage, wire codec,
//! equality and occurrence expansion.

pub mod error;
pub mod rfc;
