//! Street-name normalization for German street types.

/// Street-type spellings and their canonical form
///
/// Looked up case-insensitively against the last word of a multi-word
/// street name.
const STREET_TYPE_SYNONYMS: &[(&str, &str)] = &[
    ("str", "straße"),
    ("str.", "straße"),
    ("strasse", "straße"),
    ("ave", "allee"),
    ("avenue", "allee"),
    ("platz", "platz"),
    ("pl", "platz"),
    ("pl.", "platz"),
    ("weg", "weg"),
    ("gasse", "gasse"),
    ("pfad", "pfad"),
    ("ring", "ring"),
];

/// Spellings of "straße" glued to the end of a compound street name
/// ("Hauptstr.", "Hauptstrasse")
const COMPOUND_STRASSE_SUFFIXES: &[&str] = &["strasse", "str.", "str"];

/// Suffixes that mark the end of a German street name
///
/// Compared against words stripped of punctuation, so the dotted form
/// never matches on its own.
pub(super) const STREET_SUFFIXES: &[&str] = &[
    "allee",
    "chaussee",
    "damm",
    "gasse",
    "pfad",
    "platz",
    "ring",
    "straße",
    "str.",
    "str",
    "weg",
    "ufer",
    "markt",
    "promenade",
    "zeile",
];

/// Normalize a street name for cache keys and provider queries
///
/// Lower-cases and trims the input. For multi-word names the last word is
/// mapped through the street-type synonym table ("Haupt Str." →
/// "haupt straße"), re-joining the words with single spaces. Otherwise a
/// "straße" abbreviation glued to the last word is expanded
/// ("Hauptstr." → "hauptstraße"), as long as the word is more than the bare
/// abbreviation. Empty input yields an empty string.
#[must_use]
pub fn normalize_street_name(street: &str) -> String {
    let normalized = street.trim().to_lowercase();

    let mut words: Vec<&str> = normalized.split_whitespace().collect();
    let synonym = match words.as_slice() {
        [_, .., last] => street_type_synonym(last),
        _ => None,
    };
    if let Some(canonical) = synonym {
        words.pop();
        words.push(canonical);
        return words.join(" ");
    }

    let split_at = normalized.rfind(char::is_whitespace).map_or(0, |idx| {
        idx + normalized[idx..].chars().next().map_or(0, char::len_utf8)
    });
    let (head, last_word) = normalized.split_at(split_at);
    match expand_compound_strasse(last_word) {
        Some(expanded) => format!("{head}{expanded}"),
        None => normalized,
    }
}

fn street_type_synonym(word: &str) -> Option<&'static str> {
    STREET_TYPE_SYNONYMS
        .iter()
        .find(|(spelling, _)| *spelling == word)
        .map(|(_, canonical)| *canonical)
}

fn expand_compound_strasse(word: &str) -> Option<String> {
    COMPOUND_STRASSE_SUFFIXES.iter().find_map(|suffix| {
        word.strip_suffix(suffix)
            .filter(|stem| !stem.is_empty())
            .map(|stem| format!("{stem}straße"))
    })
}
