//! Service wiring
//!
//! Builds the application services from configuration: one provider adapter
//! per configured provider, in order, sharing one session cache.

use std::sync::Arc;

use application::{ApplicationError, GeocodeService, GeocodingProviderPort};
use integration_geocoding::{GeocodingClient, NominatimClient, PhotonClient};
use tracing::info;

use crate::{
    adapters::GeocodingProviderAdapter,
    cache::MokaGeocodeCache,
    config::{GeocodingAppConfig, ProviderKind},
};

/// Create the adapters for the configured providers, in order
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` if a client cannot be built
/// from its settings.
pub fn build_providers(
    config: &GeocodingAppConfig,
) -> Result<Vec<Arc<dyn GeocodingProviderPort>>, ApplicationError> {
    config
        .providers
        .iter()
        .map(|kind| {
            let client: Arc<dyn GeocodingClient> = match kind {
                ProviderKind::Nominatim => Arc::new(
                    NominatimClient::new(&config.nominatim)
                        .map_err(|e| ApplicationError::Configuration(format!("nominatim: {e}")))?,
                ),
                ProviderKind::Photon => Arc::new(
                    PhotonClient::new(&config.photon)
                        .map_err(|e| ApplicationError::Configuration(format!("photon: {e}")))?,
                ),
            };
            Ok(Arc::new(GeocodingProviderAdapter::new(client)) as Arc<dyn GeocodingProviderPort>)
        })
        .collect()
}

/// Create the resolver with a fresh session cache
///
/// # Errors
///
/// Returns an error if a provider client cannot be built.
pub fn build_geocode_service(
    config: &GeocodingAppConfig,
) -> Result<GeocodeService, ApplicationError> {
    let providers = build_providers(config)?;
    let cache = Arc::new(MokaGeocodeCache::with_max_entries(config.cache_max_entries));

    let service =
        GeocodeService::new(providers, cache).with_attempt_timeout(config.attempt_timeout());
    info!(
        providers = ?service.provider_ids(),
        attempt_timeout_secs = config.attempt_timeout_secs,
        "Geocode service ready"
    );
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers_follow_configured_order() {
        let mut config = GeocodingAppConfig::default();
        config.providers = vec![ProviderKind::Photon, ProviderKind::Nominatim];

        let providers = build_providers(&config).unwrap();
        let ids: Vec<_> = providers.iter().map(|p| p.provider_id()).collect();
        assert_eq!(ids, vec!["photon", "nominatim"]);
    }

    #[test]
    fn invalid_client_settings_are_configuration_errors() {
        let mut config = GeocodingAppConfig::default();
        config.nominatim.timeout_secs = 0;

        let err = build_geocode_service(&config).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(ref msg) if msg.starts_with("nominatim")));
    }

    #[tokio::test]
    async fn service_starts_with_empty_cache() {
        let service = build_geocode_service(&GeocodingAppConfig::default()).unwrap();
        assert_eq!(service.provider_ids(), vec!["nominatim"]);
        assert_eq!(service.cached_entries().await, 0);
    }
}
