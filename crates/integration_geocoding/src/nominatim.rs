//! Nominatim geocoding client
//!
//! Resolves addresses with the [Nominatim](https://nominatim.openstreetmap.org)
//! search API (OpenStreetMap). Supports structured (street + city) and
//! free-text queries.
//!
//! Requests are spaced according to `request_interval_ms`; the public
//! instance allows at most one request per second.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::{
    GeocodingClient, GeocodingError, NominatimConfig, Place,
    models::{SearchKind, SearchRequest},
};

/// Nominatim-based geocoding client with request spacing
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    config: NominatimConfig,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimClient {
    /// Create a new Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Wait until the configured spacing since the previous request has passed
    async fn throttle(&self) {
        let interval = Duration::from_millis(self.config.request_interval_ms);
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval.saturating_sub(elapsed);
                debug!(?wait, "Spacing Nominatim request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn query_params(&self, request: &SearchRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "jsonv2".to_string()),
            ("limit", request.limit.to_string()),
            ("accept-language", self.config.accept_language.clone()),
            ("addressdetails", "1".to_string()),
        ];

        match &request.kind {
            SearchKind::Structured { street, city } => {
                params.push(("street", street.clone()));
                if !city.is_empty() {
                    params.push(("city", city.clone()));
                }
                if let Some(country) = &request.country_code {
                    params.push(("country", country.clone()));
                }
            },
            SearchKind::FreeText(query) => {
                params.push(("q", query.clone()));
                if let Some(country) = &request.country_code {
                    params.push(("countrycodes", country.clone()));
                }
            },
        }
        params
    }
}

#[async_trait]
impl GeocodingClient for NominatimClient {
    #[instrument(skip(self), fields(limit = request.limit))]
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>, GeocodingError> {
        self.throttle().await;

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let params = self.query_params(request);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| GeocodingError::from_reqwest(&e, self.config.timeout_secs))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(GeocodingError::RateLimitExceeded { retry_after_secs });
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let places = results
            .into_iter()
            .map(NominatimResult::into_place)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(found = places.len(), "Nominatim search finished");
        Ok(places)
    }

    fn provider_name(&self) -> &'static str {
        "nominatim"
    }
}

/// Raw Nominatim API response entry
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimResult {
    fn into_place(self) -> Result<Place, GeocodingError> {
        let lat: f64 = self
            .lat
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("Invalid latitude {:?}", self.lat)))?;
        let lon: f64 = self
            .lon
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("Invalid longitude {:?}", self.lon)))?;
        let location =
            GeoLocation::new(lat, lon).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(Place {
            location,
            display_name: self.display_name.unwrap_or_default(),
        })
    }
}
