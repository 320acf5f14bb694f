//! Photon geocoding client
//!
//! Client for the [Photon](https://photon.komoot.io) search API, an
//! OpenStreetMap geocoder without a structured search mode. Structured
//! requests are flattened to one line and the country restriction is applied
//! to the returned features.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use crate::{GeocodingClient, GeocodingError, PhotonConfig, Place, models::SearchRequest};

/// Minimum page size when the country filter runs client-side
const COUNTRY_FILTER_FETCH_LIMIT: u32 = 10;

/// Photon API response structures
mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct FeatureCollection {
        #[serde(default)]
        pub features: Vec<Feature>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Feature {
        pub geometry: Geometry,
        #[serde(default)]
        pub properties: Properties,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        /// `[longitude, latitude]`
        pub coordinates: Vec<f64>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct Properties {
        pub name: Option<String>,
        pub street: Option<String>,
        pub housenumber: Option<String>,
        pub postcode: Option<String>,
        pub city: Option<String>,
        pub countrycode: Option<String>,
    }
}

/// Photon-based geocoding client
#[derive(Debug)]
pub struct PhotonClient {
    client: Client,
    config: PhotonConfig,
}

impl PhotonClient {
    /// Create a new Photon client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &PhotonConfig) -> Result<Self, GeocodingError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Page size to request from Photon
    ///
    /// Photon has no country parameter, so a restricted request fetches a
    /// larger page and the filter trims it afterwards.
    const fn fetch_limit(request: &SearchRequest) -> u32 {
        if request.country_code.is_some() && request.limit < COUNTRY_FILTER_FETCH_LIMIT {
            COUNTRY_FILTER_FETCH_LIMIT
        } else {
            request.limit
        }
    }

    /// Convert a feature, keeping it only if it lies in the requested country
    fn convert_feature(
        feature: api::Feature,
        country_code: Option<&str>,
    ) -> Result<Option<Place>, GeocodingError> {
        if let Some(wanted) = country_code {
            let matches = feature
                .properties
                .countrycode
                .as_deref()
                .is_some_and(|code| code.eq_ignore_ascii_case(wanted));
            if !matches {
                return Ok(None);
            }
        }

        let (lon, lat) = match feature.geometry.coordinates.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            _ => {
                return Err(GeocodingError::ParseError(
                    "Point geometry needs two coordinates".to_string(),
                ));
            },
        };
        let location =
            GeoLocation::new(lat, lon).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(Some(Place {
            location,
            display_name: display_name(&feature.properties),
        }))
    }
}

/// Label like "Hauptstraße 9, 66649 Oberthal"
fn display_name(props: &api::Properties) -> String {
    let street_line = match (&props.street, &props.housenumber) {
        (Some(street), Some(number)) => Some(format!("{street} {number}")),
        (Some(street), None) => Some(street.clone()),
        (None, _) => None,
    };
    let head = street_line.or_else(|| props.name.clone());
    let town = match (&props.postcode, &props.city) {
        (Some(postcode), Some(city)) => Some(format!("{postcode} {city}")),
        (None, Some(city)) => Some(city.clone()),
        (Some(postcode), None) => Some(postcode.clone()),
        (None, None) => None,
    };

    [head, town]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl GeocodingClient for PhotonClient {
    #[instrument(skip(self), fields(limit = request.limit))]
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>, GeocodingError> {
        let url = format!("{}/api", self.config.base_url.trim_end_matches('/'));
        let params = [
            ("q", request.as_free_text()),
            ("limit", Self::fetch_limit(request).to_string()),
            ("lang", self.config.language.clone()),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| GeocodingError::from_reqwest(&e, self.config.timeout_secs))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded {
                retry_after_secs: None,
            });
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let collection: api::FeatureCollection = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let country = request.country_code.as_deref();
        let mut places = Vec::with_capacity(collection.features.len());
        for feature in collection.features {
            if let Some(place) = Self::convert_feature(feature, country)? {
                places.push(place);
            }
        }
        places.truncate(request.limit as usize);

        debug!(found = places.len(), "Photon search finished");
        Ok(places)
    }

    fn provider_name(&self) -> &'static str {
        "photon"
    }
}
