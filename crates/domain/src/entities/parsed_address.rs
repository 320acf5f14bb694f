//! Structured address produced by the address parser

use serde::{Deserialize, Serialize};
use std::fmt;

/// A free-text address split into street, house number and locality
///
/// Any field may be empty; the parser never fails.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedAddress {
    /// Street name as written (not normalized)
    pub street: String,
    /// House number, possibly with suffix ("12a") or range ("12/14")
    pub house_number: String,
    /// Town or municipality, empty when the input had no comma
    pub locality: String,
}

impl ParsedAddress {
    /// Create a parsed address from its parts
    #[must_use]
    pub fn new(
        street: impl Into<String>,
        house_number: impl Into<String>,
        locality: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            house_number: house_number.into(),
            locality: locality.into(),
        }
    }

    /// Whether street and house number are both present
    ///
    /// Incomplete addresses are skipped by bulk callers instead of being
    /// sent to the geocoder.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.street.trim().is_empty() && !self.house_number.trim().is_empty()
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = format!("{} {}", self.street, self.house_number);
        let line = line.trim();
        if self.locality.is_empty() {
            write!(f, "{line}")
        } else {
            write!(f, "{line}, {}", self.locality)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_requires_street_and_number() {
        assert!(ParsedAddress::new("Hauptstraße", "9", "").is_complete());
        assert!(!ParsedAddress::new("", "Marktplatz", "").is_complete());
        assert!(!ParsedAddress::new("Hauptstraße", " ", "Mainz").is_complete());
    }

    #[test]
    fn display_with_locality() {
        let addr = ParsedAddress::new("Bahnhofstraße", "12a", "Mainz");
        assert_eq!(addr.to_string(), "Bahnhofstraße 12a, Mainz");
    }

    #[test]
    fn display_without_locality() {
        let addr = ParsedAddress::new("", "Marktplatz", "");
        assert_eq!(addr.to_string(), "Marktplatz");
    }
}
