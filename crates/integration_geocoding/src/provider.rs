//! Geocoding client trait

use async_trait::async_trait;

use crate::{GeocodingError, Place, SearchRequest};

/// Trait for geocoding services
///
/// Implemented by all backends (Nominatim, Photon).
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search for places matching a request
    ///
    /// An empty list means the service found nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable, answers with an
    /// error status, or sends an unreadable payload.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>, GeocodingError>;

    /// Get the provider name (e.g., "nominatim", "photon")
    fn provider_name(&self) -> &'static str;
}
