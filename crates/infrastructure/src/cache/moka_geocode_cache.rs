//! Moka in-memory geocode cache
//!
//! Session-lifetime store of resolved addresses. Entries never expire;
//! an optional capacity bound evicts the least useful entries first.

use std::sync::atomic::{AtomicU64, Ordering};

use application::ports::GeocodeCachePort;
use async_trait::async_trait;
use domain::{AddressKey, GeocodeResult};
use moka::future::Cache;
use tracing::debug;

/// Moka-backed [`GeocodeCachePort`]
pub struct MokaGeocodeCache {
    cache: Cache<AddressKey, GeocodeResult>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for MokaGeocodeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaGeocodeCache")
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl MokaGeocodeCache {
    /// Unbounded cache for one session
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_entries(None)
    }

    /// Cache holding at most `max_entries` results, or unbounded for `None`
    #[must_use]
    pub fn with_max_entries(max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder();
        if let Some(max) = max_entries {
            builder = builder.max_capacity(max);
        }

        Self {
            cache: builder.build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Number of lookups answered from the cache
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of lookups that found nothing
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl Default for MokaGeocodeCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeocodeCachePort for MokaGeocodeCache {
    async fn get(&self, key: &AddressKey) -> Option<GeocodeResult> {
        let hit = self.cache.get(key).await;
        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(%key, "Geocode cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(%key, "Geocode cache miss");
        }
        hit
    }

    async fn insert(&self, key: AddressKey, result: GeocodeResult) {
        self.cache.insert(key, result).await;
    }

    async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use domain::{AccuracyLabel, GeoLocation, GeocodeStrategy};

    use super::*;

    fn result(lat: f64) -> GeocodeResult {
        GeocodeResult {
            location: GeoLocation::new_unchecked(lat, 7.0834),
            accuracy: AccuracyLabel::Address,
            provider_id: "nominatim".to_string(),
            strategy: GeocodeStrategy::Structured,
            display_name: "Hauptstraße 9, Oberthal".to_string(),
            reduction: None,
        }
    }

    fn key() -> AddressKey {
        AddressKey::new("hauptstraße", "9", "Oberthal")
    }

    #[tokio::test]
    async fn get_after_insert() {
        let cache = MokaGeocodeCache::new();
        cache.insert(key(), result(49.5)).await;

        assert_eq!(cache.get(&key()).await, Some(result(49.5)));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 0);
    }

    #[tokio::test]
    async fn miss_is_counted() {
        let cache = MokaGeocodeCache::new();
        assert!(cache.get(&key()).await.is_none());
        assert_eq!(cache.misses(), 1);
    }

    #[tokio::test]
    async fn last_write_wins() {
        let cache = MokaGeocodeCache::new();
        cache.insert(key(), result(49.5)).await;
        cache.insert(key(), result(49.6)).await;

        assert_eq!(cache.get(&key()).await, Some(result(49.6)));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn keys_ignore_case_and_whitespace() {
        let cache = MokaGeocodeCache::new();
        cache.insert(key(), result(49.5)).await;

        let other = AddressKey::new(" Hauptstraße ", "9", "oberthal ");
        assert!(cache.get(&other).await.is_some());
    }

    #[tokio::test]
    async fn empty_until_first_insert() {
        let cache = MokaGeocodeCache::default();
        assert!(cache.is_empty().await);
        cache.insert(key(), result(49.5)).await;
        assert!(!cache.is_empty().await);
    }

    #[tokio::test]
    async fn bounded_cache_stays_within_capacity() {
        let cache = MokaGeocodeCache::with_max_entries(Some(2));
        for n in 0..10 {
            let key = AddressKey::new("hauptstraße", &n.to_string(), "Oberthal");
            cache.insert(key, result(49.5)).await;
        }
        assert!(cache.len().await <= 2);
    }

    #[test]
    fn debug_shows_counters() {
        let debug = format!("{:?}", MokaGeocodeCache::new());
        assert!(debug.contains("MokaGeocodeCache"));
        assert!(debug.contains("hits"));
    }
}
