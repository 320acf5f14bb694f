//! Geocoding client configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::GeocodingError;

/// User agent sent to public geocoding services
pub const DEFAULT_USER_AGENT: &str =
    "Zustellkarte/0.2 (https://github.com/twohreichel/Zustellkarte)";

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_nominatim_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum spacing between requests in milliseconds (0 to disable)
    ///
    /// The public instance allows at most one request per second.
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,

    /// Preferred language of display names
    #[serde(default = "default_language")]
    pub accept_language: String,

    /// User agent identifying this application
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Configuration for the Photon geocoding service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotonConfig {
    /// Base URL for the Photon API
    #[serde(default = "default_photon_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Preferred language of labels
    #[serde(default = "default_language")]
    pub language: String,

    /// User agent identifying this application
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_photon_base_url() -> String {
    "https://photon.komoot.io".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_request_interval_ms() -> u64 {
    1100
}

fn default_language() -> String {
    "de".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_nominatim_base_url(),
            timeout_secs: default_timeout_secs(),
            request_interval_ms: default_request_interval_ms(),
            accept_language: default_language(),
            user_agent: default_user_agent(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            request_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `GeocodingError::ConfigurationError` for an unusable base URL
    /// or a zero timeout.
    pub fn validate(&self) -> Result<(), GeocodingError> {
        validate_base_url(&self.base_url)?;
        validate_timeout(self.timeout_secs)
    }
}

impl Default for PhotonConfig {
    fn default() -> Self {
        Self {
            base_url: default_photon_base_url(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
            user_agent: default_user_agent(),
        }
    }
}

impl PhotonConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `GeocodingError::ConfigurationError` for an unusable base URL
    /// or a zero timeout.
    pub fn validate(&self) -> Result<(), GeocodingError> {
        validate_base_url(&self.base_url)?;
        validate_timeout(self.timeout_secs)
    }
}

fn validate_base_url(base_url: &str) -> Result<(), GeocodingError> {
    let url = Url::parse(base_url)
        .map_err(|e| GeocodingError::ConfigurationError(format!("base_url {base_url:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(GeocodingError::ConfigurationError(format!(
            "base_url must use http or https, got {other}"
        ))),
    }
}

fn validate_timeout(timeout_secs: u64) -> Result<(), GeocodingError> {
    if timeout_secs == 0 {
        return Err(GeocodingError::ConfigurationError(
            "timeout_secs must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
