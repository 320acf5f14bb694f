//! Geocode cache port
//!
//! Session cache of successful resolutions keyed by [`AddressKey`].
//! Failures are never stored, so a later attempt may succeed.

use async_trait::async_trait;
use domain::{AddressKey, GeocodeResult};
#[cfg(test)]
use mockall::automock;

/// Port for the geocode result cache
///
/// Implementations must be safe to share between concurrent resolutions;
/// concurrent writes to the same key keep the last value.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodeCachePort: Send + Sync + std::fmt::Debug {
    /// Look up a cached result
    async fn get(&self, key: &AddressKey) -> Option<GeocodeResult>;

    /// Store a result, replacing any previous value for the key
    async fn insert(&self, key: AddressKey, result: GeocodeResult);

    /// Number of cached entries
    async fn len(&self) -> u64;

    /// Whether the cache holds no entries
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
