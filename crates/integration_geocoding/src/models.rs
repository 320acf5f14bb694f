//! Geocoding data models

use domain::GeoLocation;
use serde::{Deserialize, Serialize};

/// How a search is phrased
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchKind {
    /// Separate street and city fields
    Structured {
        /// Street name with house number
        street: String,
        /// City, town or municipality
        city: String,
    },
    /// A single free-text query
    FreeText(String),
}

/// A search request to a geocoding service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query phrasing
    pub kind: SearchKind,
    /// Maximum number of results
    pub limit: u32,
    /// ISO 3166-1 alpha-2 code to restrict results to
    pub country_code: Option<String>,
}

impl SearchRequest {
    /// Structured request with limit 1 and no country restriction
    #[must_use]
    pub fn structured(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            kind: SearchKind::Structured {
                street: street.into(),
                city: city.into(),
            },
            limit: 1,
            country_code: None,
        }
    }

    /// Free-text request with limit 1 and no country restriction
    #[must_use]
    pub fn free_text(query: impl Into<String>) -> Self {
        Self {
            kind: SearchKind::FreeText(query.into()),
            limit: 1,
            country_code: None,
        }
    }

    /// Set the result limit
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Restrict results to a country
    #[must_use]
    pub fn in_country(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    /// The request as one line of text
    ///
    /// Structured requests are joined as `"{street}, {city}"`, skipping an
    /// empty city.
    #[must_use]
    pub fn as_free_text(&self) -> String {
        match &self.kind {
            SearchKind::Structured { street, city } if city.is_empty() => street.clone(),
            SearchKind::Structured { street, city } => format!("{street}, {city}"),
            SearchKind::FreeText(query) => query.clone(),
        }
    }
}

/// A place found by a geocoding service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Coordinates of the place
    pub location: GeoLocation,
    /// Human-readable label
    pub display_name: String,
}
