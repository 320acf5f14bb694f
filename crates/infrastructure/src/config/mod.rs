//! Application configuration
//!
//! Split into sections:
//! - `geocoding`: provider order, Nominatim/Photon settings, timeouts, cache size
//! - `tracking`: position filter thresholds
//! - `telemetry`: log filter and output format
//!
//! Sources, later ones overriding earlier ones: built-in defaults, an
//! optional `config.toml` (or an explicit file), then environment variables
//! such as `ZUSTELLKARTE_GEOCODING__ATTEMPT_TIMEOUT_SECS=5` or
//! `ZUSTELLKARTE_GEOCODING__PROVIDERS=nominatim,photon`.

mod geocoding;

use std::path::Path;

use application::PositionFilterConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use geocoding::{GeocodingAppConfig, ProviderKind};

pub use crate::telemetry::TelemetryConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "ZUSTELLKARTE";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The merged configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The configuration could not be rendered as TOML
    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address resolution settings
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Position filter thresholds
    #[serde(default)]
    pub tracking: PositionFilterConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required to exist) or from
    /// the optional `config.toml`, then apply environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, an environment
    /// value does not parse, or the result is invalid.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("geocoding.providers"),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(providers = ?config.geocoding.providers, "Configuration loaded");
        Ok(config)
    }

    /// Check every section
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geocoding.validate().map_err(ConfigError::Invalid)?;
        self.tracking
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("tracking: {e}")))?;
        self.telemetry
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("telemetry: {e}")))?;
        Ok(())
    }

    /// Render the effective configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
