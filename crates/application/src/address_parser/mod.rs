//! Address parser - Split free-text German addresses into structured fields
//!
//! This module is split into focused sub-modules:
//! - [`street_names`]: Street-type synonyms and street-name normalization
//!
//! Parsing runs a fixed cascade of heuristics; the first one that matches
//! wins and a final fallback guarantees a result.

mod street_names;

use std::fmt;
use std::sync::LazyLock;

use domain::{HouseNumber, ParsedAddress};
use regex::Regex;
use tracing::trace;

pub use street_names::normalize_street_name;
use street_names::STREET_SUFFIXES;

/// "street housenumber" with the house number anchored at the end
static STREET_AND_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with a valid static pattern
    Regex::new(r"^(.+?)\s+([0-9]+\s*[a-zA-Z0-9/\-]*)$").expect("valid street/number pattern")
});

/// Which heuristic produced a [`ParsedAddress`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseMethod {
    /// Street followed by a trailing house number
    StreetAndNumber,
    /// Last word that looks like a house number
    TrailingHouseNumber,
    /// House number right after a known street-type word
    StreetSuffix,
    /// Last word taken as house number regardless of its shape
    Fallback,
}

impl ParseMethod {
    /// Stable label for logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StreetAndNumber => "street_and_number",
            Self::TrailingHouseNumber => "trailing_house_number",
            Self::StreetSuffix => "street_suffix",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ParseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a combined address like `"Bahnhofstraße 12a, Mainz"`
///
/// Never fails; street or house number come back empty when the input
/// gives nothing to work with.
#[must_use]
pub fn parse_address(combined: &str) -> ParsedAddress {
    parse_address_detailed(combined).0
}

/// Parse a combined address and report which heuristic matched
///
/// The part before the first comma is the street segment, the trimmed rest
/// is the locality. Later commas stay in the locality, so
/// `"…, 66649 Oberthal, Saarland"` keys differently from `"…, 66649 Oberthal"`.
/// The street segment is then tried against, in order:
/// 1. street followed by a house number at the very end,
/// 2. the last word shaped like a house number (words after it are dropped),
/// 3. a house number directly after a street-type word ("weg", "platz", ...),
/// 4. the last word, whatever it is. A single word without digits
///    therefore ends up as the house number with an empty street.
#[must_use]
pub fn parse_address_detailed(combined: &str) -> (ParsedAddress, ParseMethod) {
    let (segment, locality) = match combined.split_once(',') {
        Some((segment, rest)) => (segment.trim(), rest.trim()),
        None => (combined.trim(), ""),
    };

    let (street, house_number, method) = split_street_segment(segment);
    trace!(%segment, %method, "Parsed street segment");

    (
        ParsedAddress::new(street, house_number, locality),
        method,
    )
}

fn split_street_segment(segment: &str) -> (String, String, ParseMethod) {
    if let Some(caps) = STREET_AND_NUMBER.captures(segment) {
        return (
            caps[1].trim().to_string(),
            caps[2].trim().to_string(),
            ParseMethod::StreetAndNumber,
        );
    }

    let mut words: Vec<&str> = segment.split_whitespace().collect();

    if let Some(idx) = words
        .iter()
        .rposition(|word| HouseNumber::is_house_number_token(word))
    {
        return (
            words[..idx].join(" "),
            words[idx].to_string(),
            ParseMethod::TrailingHouseNumber,
        );
    }

    if let Some(idx) = find_number_after_street_suffix(&words) {
        return (
            words[..=idx].join(" "),
            words[idx + 1].to_string(),
            ParseMethod::StreetSuffix,
        );
    }

    let house_number = words.pop().unwrap_or_default().to_string();
    (words.join(" "), house_number, ParseMethod::Fallback)
}

/// Index of a street-type word that is directly followed by a house number
fn find_number_after_street_suffix(words: &[&str]) -> Option<usize> {
    (0..words.len().saturating_sub(1)).rev().find(|&idx| {
        let stripped: String = words[idx]
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || "äöüß".contains(*c))
            .collect();
        STREET_SUFFIXES.contains(&stripped.as_str())
            && HouseNumber::is_house_number_token(words[idx + 1])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parsed(street: &str, house_number: &str, locality: &str) -> ParsedAddress {
        ParsedAddress::new(street, house_number, locality)
    }

    #[test]
    fn street_number_and_locality() {
        let (address, method) = parse_address_detailed("Bahnhofstraße 12a, Mainz");
        assert_eq!(address, parsed("Bahnhofstraße", "12a", "Mainz"));
        assert_eq!(method, ParseMethod::StreetAndNumber);
    }

    #[test]
    fn multi_word_street() {
        let address = parse_address("Am Alten Bahnhof 3, Oberthal");
        assert_eq!(address, parsed("Am Alten Bahnhof", "3", "Oberthal"));
    }

    #[test]
    fn slash_and_range_numbers() {
        assert_eq!(
            parse_address("Hauptstraße 12/14, Tholey"),
            parsed("Hauptstraße", "12/14", "Tholey")
        );
        assert_eq!(
            parse_address("Ringstraße 3-5"),
            parsed("Ringstraße", "3-5", "")
        );
    }

    #[test]
    fn number_with_space_before_letter() {
        let (address, method) = parse_address_detailed("Hauptstraße 12 a");
        assert_eq!(address, parsed("Hauptstraße", "12 a", ""));
        assert_eq!(method, ParseMethod::StreetAndNumber);
    }

    #[test]
    fn locality_is_everything_after_first_comma() {
        let address = parse_address("Hauptstraße 9, 66649 Oberthal, Saarland");
        assert_eq!(address.locality, "66649 Oberthal, Saarland");
    }

    #[test]
    fn house_numbers_use_ascii_digits_only() {
        let (address, method) = parse_address_detailed("Weg ١٢ 5");
        assert_eq!(address, parsed("Weg ١٢", "5", ""));
        assert_eq!(method, ParseMethod::StreetAndNumber);

        let (address, method) = parse_address_detailed("Weg ١٢");
        assert_eq!(address, parsed("Weg", "١٢", ""));
        assert_eq!(method, ParseMethod::Fallback);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let address = parse_address("   Lindenweg 4 ,  Mainz  ");
        assert_eq!(address, parsed("Lindenweg", "4", "Mainz"));
    }

    #[test]
    fn trailing_words_after_number_are_dropped() {
        let (address, method) = parse_address_detailed("Hauptstraße 12 Hinterhaus");
        assert_eq!(address, parsed("Hauptstraße", "12", ""));
        assert_eq!(method, ParseMethod::TrailingHouseNumber);
    }

    #[test]
    fn leading_number_yields_empty_street() {
        let (address, method) = parse_address_detailed("12");
        assert_eq!(address, parsed("", "12", ""));
        assert_eq!(method, ParseMethod::TrailingHouseNumber);
    }

    #[test]
    fn single_word_falls_back_to_house_number() {
        let (address, method) = parse_address_detailed("Marktplatz");
        assert_eq!(address, parsed("", "Marktplatz", ""));
        assert_eq!(method, ParseMethod::Fallback);
    }

    #[test]
    fn words_without_digits_fall_back_to_last_word() {
        let (address, method) = parse_address_detailed("Am Markt, Tholey");
        assert_eq!(address, parsed("Am", "Markt", "Tholey"));
        assert_eq!(method, ParseMethod::Fallback);
    }

    #[test]
    fn empty_input() {
        let (address, method) = parse_address_detailed("");
        assert_eq!(address, ParsedAddress::default());
        assert_eq!(method, ParseMethod::Fallback);

        let address = parse_address(", Mainz");
        assert_eq!(address, parsed("", "", "Mainz"));
    }

    #[test]
    fn suffix_scan_finds_number_after_street_type() {
        let words = ["Alter", "Weg", "7b", "Hof"];
        assert_eq!(find_number_after_street_suffix(&words), Some(1));

        let words = ["Saarbrücker", "Str.", "12"];
        assert_eq!(find_number_after_street_suffix(&words), Some(1));

        let words = ["Im", "Winkel", "7"];
        assert_eq!(find_number_after_street_suffix(&words), None);
    }

    #[test]
    fn method_labels() {
        assert_eq!(ParseMethod::StreetAndNumber.to_string(), "street_and_number");
        assert_eq!(ParseMethod::Fallback.as_str(), "fallback");
    }

    proptest! {
        #[test]
        fn parser_never_panics(input in "\\PC{0,60}") {
            let _ = parse_address(&input);
        }

        #[test]
        fn generated_addresses_round_trip(
            street in "[A-ZÄÖÜ][a-zäöüß]{2,12}(straße|weg|gasse)",
            number in "[1-9][0-9]{0,2}[a-d]?",
            locality in "[A-Z][a-z]{2,10}"
        ) {
            let address = parse_address(&format!("{street} {number}, {locality}"));
            prop_assert_eq!(address, ParsedAddress::new(street, number, locality));
        }
    }
}
