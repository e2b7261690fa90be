//! Shared configuration, constants and errors for the kairos crates.

pub mod config;
pub mod constants;
pub mod error;
