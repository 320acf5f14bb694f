//! Geocode service - Multi-strategy, multi-provider address resolution
//!
//! Resolves a German street address to coordinates by trying a fixed
//! sequence of query formulations against an ordered list of providers,
//! falling back to coarser queries until one returns a candidate. Successful
//! resolutions are cached for the lifetime of the service.

use std::{fmt, sync::Arc, time::Duration};

use domain::{
    AccuracyLabel, AddressKey, GeocodeResult, GeocodeStrategy, HouseNumber, HouseNumberReduction,
};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::{
    address_parser::normalize_street_name,
    error::ApplicationError,
    ports::{
        COUNTRY_NAME, GeocodeCachePort, GeocodeCandidate, GeocodeQuery, GeocodingProviderPort,
    },
};

/// Strategies in the order they are attempted
const STRATEGY_ORDER: [GeocodeStrategy; 6] = [
    GeocodeStrategy::Structured,
    GeocodeStrategy::StructuredReduced,
    GeocodeStrategy::FreeText,
    GeocodeStrategy::FreeTextReduced,
    GeocodeStrategy::LocalityOnly,
    GeocodeStrategy::VerbatimStreetReduced,
];

/// Resolves addresses through a provider chain with a session cache
pub struct GeocodeService {
    providers: Vec<Arc<dyn GeocodingProviderPort>>,
    cache: Arc<dyn GeocodeCachePort>,
    attempt_timeout: Option<Duration>,
}

impl fmt::Debug for GeocodeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodeService")
            .field("providers", &self.provider_ids())
            .field("cache", &self.cache)
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}

impl GeocodeService {
    /// Create a service; providers are asked in the given order
    pub fn new(
        providers: Vec<Arc<dyn GeocodingProviderPort>>,
        cache: Arc<dyn GeocodeCachePort>,
    ) -> Self {
        Self {
            providers,
            cache,
            attempt_timeout: None,
        }
    }

    /// Bound every single provider attempt; `None` waits indefinitely
    #[must_use]
    pub const fn with_attempt_timeout(mut self, attempt_timeout: Option<Duration>) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Identifiers of the configured providers, in query order
    pub fn provider_ids(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.provider_id()).collect()
    }

    /// Number of cached resolutions
    pub async fn cached_entries(&self) -> u64 {
        self.cache.len().await
    }

    /// Resolve an address to coordinates
    ///
    /// Returns a cached result without provider traffic when the same
    /// address (after street normalization, ignoring case) was resolved
    /// before. Otherwise strategies are tried in order and the first
    /// candidate found wins. Provider failures are logged and skipped;
    /// `None` means every strategy came back empty.
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        street: &str,
        house_number: &str,
        locality: &str,
    ) -> Option<GeocodeResult> {
        let request = ResolveRequest::new(street, house_number, locality);

        if let Some(hit) = self.cache.get(&request.key).await {
            debug!(key = %request.key, "Geocode cache hit");
            return Some(hit);
        }

        for strategy in STRATEGY_ORDER {
            let Some(query) = request.query_for(strategy) else {
                continue;
            };

            if strategy == GeocodeStrategy::StructuredReduced {
                let hit = self.reduced_cache_hit(&request).await;
                if hit.is_some() {
                    return hit;
                }
            }

            if let Some((candidate, provider_id)) = self.attempt(strategy, &query).await {
                let result = request.result_from(candidate, provider_id, strategy);
                self.commit(&request, strategy, &result).await;
                info!(
                    provider = provider_id,
                    %strategy,
                    accuracy = %result.accuracy,
                    location = %result.location,
                    "Address resolved"
                );
                return Some(result);
            }
        }

        warn!(key = %request.key, "All geocoding strategies failed");
        None
    }

    /// Reuse a result cached under the reduced house number
    async fn reduced_cache_hit(&self, request: &ResolveRequest) -> Option<GeocodeResult> {
        let reduced_key = request.reduced_key.as_ref()?;
        let mut hit = self.cache.get(reduced_key).await?;
        debug!(key = %reduced_key, "Geocode cache hit for reduced house number");

        hit.reduction = request.reduction();
        if hit.accuracy == AccuracyLabel::Address {
            hit.accuracy = AccuracyLabel::ReducedAddress;
        }
        self.cache.insert(request.key.clone(), hit.clone()).await;
        Some(hit)
    }

    /// Ask every provider in turn; the first non-empty answer wins
    async fn attempt(
        &self,
        strategy: GeocodeStrategy,
        query: &GeocodeQuery,
    ) -> Option<(GeocodeCandidate, &'static str)> {
        for provider in &self.providers {
            let provider_id = provider.provider_id();
            debug!(provider = provider_id, %strategy, query = %query.describe(), "Geocoding attempt");

            match self.search(provider.as_ref(), query).await {
                Ok(candidates) => match candidates.into_iter().next() {
                    Some(candidate) => return Some((candidate, provider_id)),
                    None => debug!(provider = provider_id, %strategy, "No candidates"),
                },
                Err(e) => warn!(
                    provider = provider_id,
                    %strategy,
                    error = %e,
                    transient = e.is_transient(),
                    "Geocoding attempt failed"
                ),
            }
        }
        None
    }

    async fn search(
        &self,
        provider: &dyn GeocodingProviderPort,
        query: &GeocodeQuery,
    ) -> Result<Vec<GeocodeCandidate>, ApplicationError> {
        let Some(limit) = self.attempt_timeout else {
            return provider.search(query).await;
        };

        timeout(limit, provider.search(query))
            .await
            .map_err(|_| ApplicationError::Timeout {
                operation: format!("{} search", provider.provider_id()),
                timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            })?
    }

    async fn commit(
        &self,
        request: &ResolveRequest,
        strategy: GeocodeStrategy,
        result: &GeocodeResult,
    ) {
        let reduced_key = request.reduced_key.as_ref().filter(|_| {
            matches!(
                strategy,
                GeocodeStrategy::StructuredReduced | GeocodeStrategy::FreeTextReduced
            )
        });
        if let Some(reduced_key) = reduced_key {
            self.cache.insert(reduced_key.clone(), result.clone()).await;
        }
        self.cache.insert(request.key.clone(), result.clone()).await;
    }
}

/// Inputs of one resolution, trimmed and pre-computed
#[derive(Debug)]
struct ResolveRequest {
    street: String,
    normalized_street: String,
    house_number: HouseNumber,
    reduced: Option<HouseNumber>,
    locality: String,
    key: AddressKey,
    reduced_key: Option<AddressKey>,
}

impl ResolveRequest {
    fn new(street: &str, house_number: &str, locality: &str) -> Self {
        let street = street.trim().to_string();
        let normalized_street = normalize_street_name(&street);
        let house_number = HouseNumber::new(house_number);
        let reduced = house_number.reduced();
        let locality = locality.trim().to_string();

        let key = AddressKey::new(&normalized_street, house_number.as_str(), &locality);
        let reduced_key = reduced
            .as_ref()
            .map(|r| AddressKey::new(&normalized_street, r.as_str(), &locality));

        Self {
            street,
            normalized_street,
            house_number,
            reduced,
            locality,
            key,
            reduced_key,
        }
    }

    /// Query for a strategy, `None` when the strategy does not apply
    fn query_for(&self, strategy: GeocodeStrategy) -> Option<GeocodeQuery> {
        match strategy {
            GeocodeStrategy::Structured => Some(GeocodeQuery::structured(
                street_line(&self.normalized_street, &self.house_number),
                &self.locality,
            )),
            GeocodeStrategy::StructuredReduced => self.reduced.as_ref().map(|reduced| {
                GeocodeQuery::structured(
                    street_line(&self.normalized_street, reduced),
                    &self.locality,
                )
            }),
            GeocodeStrategy::FreeText => Some(GeocodeQuery::free_text(
                self.free_text_line(&self.house_number),
            )),
            GeocodeStrategy::FreeTextReduced => self
                .reduced
                .as_ref()
                .map(|reduced| GeocodeQuery::free_text(self.free_text_line(reduced))),
            GeocodeStrategy::LocalityOnly => (!self.locality.is_empty()).then(|| GeocodeQuery {
                restrict_country: false,
                ..GeocodeQuery::free_text(format!("{}, {COUNTRY_NAME}", self.locality))
            }),
            GeocodeStrategy::VerbatimStreetReduced => self
                .reduced
                .as_ref()
                .filter(|_| self.street != self.normalized_street)
                .map(|reduced| {
                    GeocodeQuery::structured(street_line(&self.street, reduced), &self.locality)
                }),
        }
    }

    fn free_text_line(&self, house_number: &HouseNumber) -> String {
        [
            street_line(&self.normalized_street, house_number).as_str(),
            self.locality.as_str(),
            COUNTRY_NAME,
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
    }

    fn reduction(&self) -> Option<HouseNumberReduction> {
        self.reduced.as_ref().map(|reduced| HouseNumberReduction {
            original: self.house_number.to_string(),
            reduced: reduced.to_string(),
        })
    }

    fn result_from(
        &self,
        candidate: GeocodeCandidate,
        provider_id: &str,
        strategy: GeocodeStrategy,
    ) -> GeocodeResult {
        GeocodeResult {
            location: candidate.location,
            accuracy: strategy.accuracy(),
            provider_id: provider_id.to_string(),
            strategy,
            display_name: candidate.display_name,
            reduction: if strategy.uses_reduced_house_number() {
                self.reduction()
            } else {
                None
            },
        }
    }
}

fn street_line(street: &str, house_number: &HouseNumber) -> String {
    format!("{street} {house_number}").trim().to_string()
}
