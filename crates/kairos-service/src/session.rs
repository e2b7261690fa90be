//! Per-session settings the datum functions run under.

use kairos_core::config::Settings;
use kairos_core::constants::DEFAULT_SESSION_TIMEZONE;
use kairos_rfc::rfc::rrule::expand::TimeZoneResolver;
use kairos_rfc::rfc::rrule::{ExpansionOptions, StorageLimits, ZoneContext};

/// Session zone and limits, derived once from [`Settings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    timezone: String,
    limits: StorageLimits,
    expansion: ExpansionOptions,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_SESSION_TIMEZONE.to_string(),
            limits: StorageLimits::default(),
            expansion: ExpansionOptions::default(),
        }
    }
}

impl Session {
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            timezone: settings.session.timezone.clone(),
            limits: StorageLimits {
                max_buffer_size: settings.storage.max_buffer_size,
            },
            expansion: ExpansionOptions {
                max_occurrences: settings.expansion.max_occurrences,
            },
        }
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    #[must_use]
    pub const fn limits(&self) -> &StorageLimits {
        &self.limits
    }

    #[must_use]
    pub const fn expansion(&self) -> &ExpansionOptions {
        &self.expansion
    }

    /// Zone context the zone-aware expansions iterate in.
    #[must_use]
    pub fn zone(&self) -> ZoneContext<'_> {
        ZoneContext::Session(&self.timezone)
    }

    /// Resolves the session zone, falling back to UTC with a warning.
    #[must_use]
    pub fn resolve_zone(&self) -> chrono_tz::Tz {
        TimeZoneResolver::new().resolve_or_utc(&self.timezone)
    }
}
