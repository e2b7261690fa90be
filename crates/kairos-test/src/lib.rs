//! Kairos integration test support.
//!
//! Re-exports the workspace crates under one path and provides the small
//! builders the cross-crate tests share.

pub mod component {
    pub use kairos_core::{config, constants};
    pub use kairos_rfc::rfc::rrule;
    pub use kairos_service::{datum, session};

    pub mod error {
        pub use kairos_core::error::CoreError;
        pub use kairos_rfc::error::RfcError;
        pub use kairos_service::error::ServiceError;
    }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use kairos_rfc::rfc::rrule::StoredRecurrence;
use kairos_service::datum::io::input;
use kairos_service::session::Session;

/// ## Summary
/// Stores RRULE text under the default session.
///
/// ## Panics
/// Panics if the text does not parse.
#[must_use]
pub fn stored(text: &str) -> StoredRecurrence {
    input(text, &Session::default())
        .unwrap_or_else(|err| panic!("Failed to store {text}: {err}"))
}

/// ## Panics
/// Panics on an impossible date or time.
#[must_use]
pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s)
        .single()
        .unwrap_or_else(|| panic!("invalid UTC date-time {y}-{m}-{d} {h}:{min}:{s}"))
}

/// ## Panics
/// Panics on an impossible date or time.
#[must_use]
pub fn naive(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .unwrap_or_else(|| panic!("invalid date-time {y}-{m}-{d} {h}:{min}:{s}"))
}
