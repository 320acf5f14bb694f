//! Geocoding configuration: provider order, provider settings, timeouts.

use integration_geocoding::{NominatimConfig, PhotonConfig};
use serde::{Deserialize, Serialize};

/// Upstream geocoding service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenStreetMap Nominatim
    Nominatim,
    /// Komoot Photon
    Photon,
}

impl ProviderKind {
    /// Lower-case provider name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nominatim => "nominatim",
            Self::Photon => "photon",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nominatim" => Ok(Self::Nominatim),
            "photon" => Ok(Self::Photon),
            _ => Err(format!(
                "Unknown geocoding provider: {s}. Use 'nominatim' or 'photon'"
            )),
        }
    }
}

/// Geocoding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Providers in the order they are asked (default: `["nominatim"]`)
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderKind>,

    /// Upper bound for one provider attempt in seconds, 0 disables (default: 15)
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,

    /// Maximum number of cached resolutions; unbounded when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_max_entries: Option<u64>,

    /// Nominatim settings
    #[serde(default)]
    pub nominatim: NominatimConfig,

    /// Photon settings
    #[serde(default)]
    pub photon: PhotonConfig,
}

fn default_providers() -> Vec<ProviderKind> {
    vec![ProviderKind::Nominatim]
}

const fn default_attempt_timeout_secs() -> u64 {
    15
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
            cache_max_entries: None,
            nominatim: NominatimConfig::default(),
            photon: PhotonConfig::default(),
        }
    }
}

impl GeocodingAppConfig {
    /// Per-attempt timeout, `None` when disabled
    #[must_use]
    pub const fn attempt_timeout(&self) -> Option<std::time::Duration> {
        if self.attempt_timeout_secs == 0 {
            None
        } else {
            Some(std::time::Duration::from_secs(self.attempt_timeout_secs))
        }
    }

    /// Validate the provider list and the settings of every listed provider
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.providers.is_empty() {
            return Err("geocoding.providers must name at least one provider".to_string());
        }
        for (i, provider) in self.providers.iter().enumerate() {
            if self.providers[..i].contains(provider) {
                return Err(format!("geocoding.providers lists {provider} twice"));
            }
            let checked = match provider {
                ProviderKind::Nominatim => self.nominatim.validate(),
                ProviderKind::Photon => self.photon.validate(),
            };
            checked.map_err(|e| format!("geocoding.{provider}: {e}"))?;
        }
        if self.cache_max_entries == Some(0) {
            return Err("geocoding.cache_max_entries must be at least 1".to_string());
        }
        Ok(())
    }
}
