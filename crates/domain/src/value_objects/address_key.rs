//! Cache key for geocoding queries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one geocoding query
///
/// Built from the normalized street, the house number and the locality,
/// each trimmed and lower-cased, joined with `|`. Inputs that differ only in
/// case or surrounding whitespace map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressKey(String);

impl AddressKey {
    /// Build a key from its three parts
    ///
    /// `street` is expected to be normalized already.
    #[must_use]
    pub fn new(street: &str, house_number: &str, locality: &str) -> Self {
        Self(format!(
            "{}|{}|{}",
            street.trim().to_lowercase(),
            house_number.trim().to_lowercase(),
            locality.trim().to_lowercase()
        ))
    }

    /// Get the key as string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AddressKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_lowercased_parts() {
        let key = AddressKey::new("bahnhofstraße", "12A", "Mainz");
        assert_eq!(key.as_str(), "bahnhofstraße|12a|mainz");
    }

    #[test]
    fn ignores_case_and_whitespace() {
        let a = AddressKey::new("Hauptstraße ", "9a", " Oberthal");
        let b = AddressKey::new("hauptstraße", " 9A", "OBERTHAL");
        assert_eq!(a, b);
    }

    #[test]
    fn empty_parts_are_kept() {
        assert_eq!(AddressKey::new("", "", "Mainz").as_str(), "||mainz");
    }

    #[test]
    fn different_house_numbers_differ() {
        assert_ne!(
            AddressKey::new("hauptstraße", "9a", "oberthal"),
            AddressKey::new("hauptstraße", "9", "oberthal")
        );
    }
}
