//! House number value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A house number as written on the envelope
///
/// May carry a letter suffix ("12a") or a range/slash form ("12/14").
/// Stored trimmed; otherwise kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseNumber(String);

impl HouseNumber {
    /// Create a house number from raw input
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Get the house number as string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the house number is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether a word looks like a house number
    ///
    /// A house number starts with at least one ASCII digit, followed by any
    /// mix of ASCII letters, digits, `/` and `-` (`12`, `12a`, `12/14`, `3-5`).
    #[must_use]
    pub fn is_house_number_token(word: &str) -> bool {
        let digits = word.bytes().take_while(u8::is_ascii_digit).count();
        digits > 0
            && word[digits..]
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'/' || b == b'-')
    }

    /// Split into the leading digit run and a letter-led suffix
    ///
    /// Returns `Some(("9", "A"))` for `"9A"` and `Some(("12", "a/1"))` for
    /// `"12a/1"`. Returns `None` unless the digits are directly followed by
    /// an ASCII letter.
    #[must_use]
    pub fn split_letter_suffix(&self) -> Option<(&str, &str)> {
        let digits = self.0.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let (numeric, suffix) = self.0.split_at(digits);
        suffix
            .chars()
            .next()
            .filter(char::is_ascii_alphabetic)
            .map(|_| (numeric, suffix))
    }

    /// The house number without its letter suffix ("9A" → "9")
    #[must_use]
    pub fn reduced(&self) -> Option<Self> {
        self.split_letter_suffix()
            .map(|(numeric, _)| Self(numeric.to_string()))
    }
}

impl fmt::Display for HouseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HouseNumber {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_input() {
        assert_eq!(HouseNumber::new("  12a ").as_str(), "12a");
    }

    #[test]
    fn house_number_tokens() {
        assert!(HouseNumber::is_house_number_token("12"));
        assert!(HouseNumber::is_house_number_token("12a"));
        assert!(HouseNumber::is_house_number_token("12/14"));
        assert!(HouseNumber::is_house_number_token("3-5"));
        assert!(!HouseNumber::is_house_number_token("a12"));
        assert!(!HouseNumber::is_house_number_token(""));
        assert!(!HouseNumber::is_house_number_token("12.5"));
        assert!(!HouseNumber::is_house_number_token("12ä"));
    }

    #[test]
    fn split_letter_suffix() {
        assert_eq!(HouseNumber::new("9A").split_letter_suffix(), Some(("9", "A")));
        assert_eq!(
            HouseNumber::new("12a/1").split_letter_suffix(),
            Some(("12", "a/1"))
        );
        assert_eq!(HouseNumber::new("12").split_letter_suffix(), None);
        assert_eq!(HouseNumber::new("12/14").split_letter_suffix(), None);
        assert_eq!(HouseNumber::new("A9").split_letter_suffix(), None);
        assert_eq!(HouseNumber::new("").split_letter_suffix(), None);
    }

    #[test]
    fn reduced_strips_letter_suffix() {
        assert_eq!(HouseNumber::new("9A").reduced(), Some(HouseNumber::new("9")));
        assert_eq!(HouseNumber::new("114b").reduced(), Some(HouseNumber::new("114")));
        assert_eq!(HouseNumber::new("9").reduced(), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&HouseNumber::new("9A")).unwrap();
        assert_eq!(json, "\"9A\"");
    }
}
