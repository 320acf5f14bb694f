#![forbid(unsafe_code)]
//! Geocoding integration for Zustellkarte
//!
//! HTTP clients for the OpenStreetMap geocoders used to place delivery
//! addresses on the map:
//! - [`NominatimClient`]: structured and free-text search with request spacing
//! - [`PhotonClient`]: free-text search, handy as a second opinion
//!
//! # Architecture
//!
//! Both clients implement [`GeocodingClient`]. Which providers are asked,
//! and in which order, is decided by the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{GeocodingClient, NominatimClient, NominatimConfig, SearchRequest};
//!
//! let client = NominatimClient::new(&NominatimConfig::default())?;
//! let request = SearchRequest::structured("Hauptstraße 9", "Oberthal").in_country("de");
//! for place in client.search(&request).await? {
//!     println!("{} @ {}", place.display_name, place.location);
//! }
//! ```

mod config;
mod error;
mod models;
mod nominatim;
mod photon;
mod provider;

pub use config::{DEFAULT_USER_AGENT, NominatimConfig, PhotonConfig};
pub use error::GeocodingError;
pub use models::{Place, SearchKind, SearchRequest};
pub use nominatim::NominatimClient;
pub use photon::PhotonClient;
pub use provider::GeocodingClient;
