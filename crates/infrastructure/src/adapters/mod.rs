//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geocoding_provider_adapter;
mod json_lines_location_source;

pub use geocoding_provider_adapter::GeocodingProviderAdapter;
pub use json_lines_location_source::JsonLinesLocationSource;
