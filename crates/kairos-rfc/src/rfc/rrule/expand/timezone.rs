//! Session time zone resolution.
//!
//! Uses ICU4X to map Windows zone names and legacy IANA aliases to canonical
//! IANA identifiers before looking them up in `chrono-tz`.

use std::collections::HashMap;
use std::str::FromStr;

use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;

/// Error during time zone resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneError {
    /// Unknown or invalid zone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Resolver for zone identifiers with a per-instance cache.
#[derive(Debug, Default)]
pub struct TimeZoneResolver {
    cache: HashMap<String, Tz>,
}

impl TimeZoneResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Resolves a zone identifier to a `chrono_tz::Tz`.
    ///
    /// ## Errors
    /// Returns `ZoneError::UnknownTimezone` if the name cannot be resolved.
    ///
    /// ## Side Effects
    /// Caches successful resolutions.
    pub fn resolve(&mut self, tzid: &str) -> Result<Tz, ZoneError> {
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let normalized = normalize_tzid(tzid);
        let tz = Tz::from_str(&normalized)
            .map_err(|_e| ZoneError::UnknownTimezone(tzid.to_string()))?;

        self.cache.insert(tzid.to_string(), tz);
        Ok(tz)
    }

    /// ## Summary
    /// Resolves a session zone name, falling back to UTC.
    ///
    /// ## Side Effects
    /// Emits a `warn` event when the fallback is taken.
    pub fn resolve_or_utc(&mut self, tzid: &str) -> Tz {
        self.resolve(tzid).unwrap_or_else(|e| {
            tracing::warn!(timezone = tzid, error = %e, "Falling back to UTC for session timezone");
            Tz::UTC
        })
    }
}

/// Normalizes Windows and aliased zone names to canonical IANA names.
fn normalize_tzid(tzid: &str) -> String {
    let trimmed = tzid.trim();

    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(trimmed, None) {
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    // Handles aliases like Europe/Kiev -> Europe/Kyiv
    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(trimmed);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    trimmed.to_string()
}
