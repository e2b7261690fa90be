//! Functions exposed to the host over stored recurrence values.
//!
//! Every function takes the host's bytes by reference, decodes them in
//! place and returns fresh owned output.

pub mod accessor;
pub mod io;
pub mod occurrence;
pub mod operator;
