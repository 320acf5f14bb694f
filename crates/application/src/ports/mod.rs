//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocode_cache_port;
mod geocoding_provider_port;
mod location_source_port;

pub use geocode_cache_port::GeocodeCachePort;
#[cfg(test)]
pub use geocode_cache_port::MockGeocodeCachePort;
pub use geocoding_provider_port::{
    COUNTRY_CODE, COUNTRY_NAME, GeocodeCandidate, GeocodeQuery, GeocodingProviderPort, QueryForm,
};
#[cfg(test)]
pub use geocoding_provider_port::MockGeocodingProviderPort;
pub use location_source_port::{LocationError, LocationSourcePort};
#[cfg(test)]
pub use location_source_port::MockLocationSourcePort;
