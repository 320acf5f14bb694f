//! Cache implementations
//!
//! - `MokaGeocodeCache`: in-memory store of resolved addresses

mod moka_geocode_cache;

pub use moka_geocode_cache::MokaGeocodeCache;
