//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the geocoding
//! provider adapter, the moka session cache and the JSON-lines location
//! source. Also holds configuration loading, logging setup and the wiring
//! that builds the application services.

pub mod adapters;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::{build_geocode_service, build_providers};
pub use cache::MokaGeocodeCache;
pub use config::{AppConfig, ConfigError, GeocodingAppConfig, ProviderKind};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
