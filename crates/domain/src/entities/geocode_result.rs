//! Geocoding domain entities

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::GeoLocation;

/// How precisely a geocode result pins the requested address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyLabel {
    /// Matched the full street address
    Address,
    /// Matched the street address with the house-number suffix dropped
    ReducedAddress,
    /// Only the locality centroid could be found
    Locality,
}

impl AccuracyLabel {
    /// Stable label used in reports and logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::ReducedAddress => "reduced_address",
            Self::Locality => "locality",
        }
    }
}

impl fmt::Display for AccuracyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The query formulation that produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeocodeStrategy {
    /// Structured search with street + house number and locality as city
    Structured,
    /// Structured search with the letter suffix stripped from the house number
    StructuredReduced,
    /// Free-text search for the formatted address
    FreeText,
    /// Free-text search with the letter suffix stripped
    FreeTextReduced,
    /// Free-text search for the locality alone
    LocalityOnly,
    /// Structured search with the street as entered (not normalized) and
    /// the letter suffix stripped
    VerbatimStreetReduced,
}

impl GeocodeStrategy {
    /// Stable label used in reports and logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::StructuredReduced => "structured_reduced",
            Self::FreeText => "free_text",
            Self::FreeTextReduced => "free_text_reduced",
            Self::LocalityOnly => "locality_only",
            Self::VerbatimStreetReduced => "verbatim_street_reduced",
        }
    }

    /// Whether the strategy queries with the reduced house number
    #[must_use]
    pub const fn uses_reduced_house_number(&self) -> bool {
        matches!(
            self,
            Self::StructuredReduced | Self::FreeTextReduced | Self::VerbatimStreetReduced
        )
    }

    /// Accuracy of a result found with this strategy
    #[must_use]
    pub const fn accuracy(&self) -> AccuracyLabel {
        match self {
            Self::Structured | Self::FreeText => AccuracyLabel::Address,
            Self::StructuredReduced | Self::FreeTextReduced | Self::VerbatimStreetReduced => {
                AccuracyLabel::ReducedAddress
            },
            Self::LocalityOnly => AccuracyLabel::Locality,
        }
    }
}

impl fmt::Display for GeocodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record of a house number that had to be shortened to find a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseNumberReduction {
    /// House number as requested ("9A")
    pub original: String,
    /// House number that was actually found ("9")
    pub reduced: String,
}

/// A resolved address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Resolved coordinates
    pub location: GeoLocation,

    /// Precision of the match
    pub accuracy: AccuracyLabel,

    /// Provider that answered (e.g., "nominatim")
    pub provider_id: String,

    /// Query formulation that succeeded
    pub strategy: GeocodeStrategy,

    /// Provider's display name of the matched place
    pub display_name: String,

    /// Present when the house-number suffix was dropped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduction: Option<HouseNumberReduction>,
}

impl GeocodeResult {
    /// Whether the result was found for a reduced house number
    #[must_use]
    pub const fn is_house_number_reduced(&self) -> bool {
        self.reduction.is_some()
    }

    /// The house number as originally requested, if it was reduced
    #[must_use]
    pub fn original_house_number(&self) -> Option<&str> {
        self.reduction.as_ref().map(|r| r.original.as_str())
    }

    /// The house number that was actually matched, if it was reduced
    #[must_use]
    pub fn reduced_house_number(&self) -> Option<&str> {
        self.reduction.as_ref().map(|r| r.reduced.as_str())
    }

    /// Note for delivery lists, e.g. "Hausnummer 9A nicht gefunden, zeige 9"
    #[must_use]
    pub fn reduction_note(&self) -> Option<String> {
        self.reduction.as_ref().map(|r| {
            format!(
                "Hausnummer {} nicht gefunden, zeige stattdessen Hausnummer {}",
                r.original, r.reduced
            )
        })
    }
}

impl fmt::Display for GeocodeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} via {})",
            self.location, self.accuracy, self.strategy, self.provider_id
        )
    }
}
