use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_LOG_LEVEL, DEFAULT_MAX_OCCURRENCES, DEFAULT_MAX_STORED_SIZE,
    DEFAULT_SESSION_TIMEZONE, ENV_PREFIX, MAX_OCCURRENCES_CEILING,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub storage: StorageConfig,
    pub expansion: ExpansionConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Upper bound, in bytes, for a single stored recurrence buffer.
    pub max_buffer_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    /// Occurrences a single expansion call may return before failing.
    pub max_occurrences: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Ambient time zone used by the zone-aware occurrence functions.
    pub timezone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `kairos.toml` and
    /// `KAIROS_` environment variables into a `Settings`.
    /// Environment variables take precedence over the file.
    ///
    /// Nested keys use a double underscore, e.g. `KAIROS_SESSION__TIMEZONE`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the resulting values fails.
    pub fn load() -> Result<Self> {
        let settings = defaults()?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            // Env
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Builds settings from defaults overlaid with an inline TOML document.
    ///
    /// ## Errors
    /// Returns an error if the document is malformed or the values are invalid.
    pub fn from_toml(document: &str) -> Result<Self> {
        let settings = defaults()?
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks value ranges the deserializer cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` naming the first offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.expansion.max_occurrences == 0
            || self.expansion.max_occurrences > MAX_OCCURRENCES_CEILING
        {
            return Err(CoreError::ConfigError(format!(
                "expansion.max_occurrences must be within 1..={MAX_OCCURRENCES_CEILING}, got {}",
                self.expansion.max_occurrences
            )));
        }

        if self.storage.max_buffer_size == 0 || self.storage.max_buffer_size > DEFAULT_MAX_STORED_SIZE
        {
            return Err(CoreError::ConfigError(format!(
                "storage.max_buffer_size must be within 1..={DEFAULT_MAX_STORED_SIZE}, got {}",
                self.storage.max_buffer_size
            )));
        }

        if self.session.timezone.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "session.timezone must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("storage.max_buffer_size", DEFAULT_MAX_STORED_SIZE as u64)?
        .set_default("expansion.max_occurrences", DEFAULT_MAX_OCCURRENCES as u64)?
        .set_default("session.timezone", DEFAULT_SESSION_TIMEZONE)?
        .set_default("logging.level", DEFAULT_LOG_LEVEL)
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(settings = ?settings, "Configuration loaded");
    Ok(settings)
}
