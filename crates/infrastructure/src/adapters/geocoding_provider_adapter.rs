//! Geocoding provider adapter - Implements GeocodingProviderPort using integration_geocoding

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{COUNTRY_CODE, GeocodeCandidate, GeocodeQuery, GeocodingProviderPort, QueryForm},
};
use async_trait::async_trait;
use integration_geocoding::{GeocodingClient, GeocodingError, Place, SearchRequest};
use tracing::{debug, instrument};

/// Adapter exposing one geocoding backend (Nominatim, Photon) as a provider
pub struct GeocodingProviderAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingProviderAdapter")
            .field("provider", &self.client.provider_name())
            .finish()
    }
}

impl GeocodingProviderAdapter {
    /// Wrap a geocoding client
    #[must_use]
    pub fn new(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }

    fn to_request(query: &GeocodeQuery) -> SearchRequest {
        let request = match &query.form {
            QueryForm::Structured { street, locality } => {
                SearchRequest::structured(street.as_str(), locality.as_str())
            },
            QueryForm::FreeText(text) => SearchRequest::free_text(text.as_str()),
        }
        .with_limit(query.limit);

        if query.restrict_country {
            request.in_country(COUNTRY_CODE)
        } else {
            request
        }
    }

    fn map_error(&self, err: GeocodingError) -> ApplicationError {
        let provider = self.client.provider_name();
        match err {
            GeocodingError::Timeout { timeout_secs } => ApplicationError::Timeout {
                operation: format!("{provider} search"),
                timeout_ms: timeout_secs.saturating_mul(1000),
            },
            GeocodingError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            GeocodingError::ConfigurationError(msg) => {
                ApplicationError::Configuration(format!("{provider}: {msg}"))
            },
            other => ApplicationError::ExternalService(format!("{provider} search failed: {other}")),
        }
    }

    fn to_candidate(place: Place) -> GeocodeCandidate {
        GeocodeCandidate {
            location: place.location,
            display_name: place.display_name,
        }
    }
}

#[async_trait]
impl GeocodingProviderPort for GeocodingProviderAdapter {
    fn provider_id(&self) -> &'static str {
        self.client.provider_name()
    }

    #[instrument(skip(self, query), fields(provider = self.client.provider_name(), query = %query.describe()))]
    async fn search(&self, query: &GeocodeQuery) -> Result<Vec<GeocodeCandidate>, ApplicationError> {
        let request = Self::to_request(query);
        let places = self
            .client
            .search(&request)
            .await
            .map_err(|e| self.map_error(e))?;

        debug!(count = places.len(), "Provider returned candidates");
        Ok(places.into_iter().map(Self::to_candidate).collect())
    }
}
