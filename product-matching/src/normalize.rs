//! Market question normalization
//!
//! Venues phrase the same event differently ("GOP wins" vs "Republican
//! victory"). Normalization lowercases, strips punctuation, and maps common
//! synonyms onto canonical forms so downstream similarity scoring compares
//! like with like.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s\-\?\!]").expect("valid regex");

    /// Synonym table applied in order; word-boundary matches only.
    static ref REPLACEMENTS: Vec<(Regex, &'static str)> = [
        // Political terms
        ("trump", "donald trump"),
        ("biden", "joe biden"),
        ("harris", "kamala harris"),
        ("democrats", "democratic party"),
        ("republicans", "republican party"),
        ("gop", "republican party"),
        ("dems", "democratic party"),
        // Government terms
        ("senate", "us senate"),
        ("house", "us house"),
        ("congress", "us congress"),
        ("presidency", "president"),
        ("presidential", "president"),
        // Time terms
        ("2024", "2024 election"),
        ("next", "upcoming"),
        // Action terms
        ("win", "victory"),
        ("wins", "victory"),
        ("elected", "victory"),
        ("control", "majority"),
        ("controls", "majority"),
        // Market terms
        ("above", "over"),
        ("below", "under"),
        ("reaches", "hits"),
        ("exceeds", "over"),
    ]
    .iter()
    .map(|(word, replacement)| {
        let pattern = format!(r"\b{}\b", regex::escape(word));
        (Regex::new(&pattern).expect("valid synonym regex"), *replacement)
    })
    .collect();

    static ref STOP_WORDS: HashSet<&'static str> = [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
        "by", "will", "be", "is", "are", "was", "were",
    ]
    .iter()
    .copied()
    .collect();
}

/// Normalize a market question for comparison.
pub fn normalize_product_name(product_name: &str) -> String {
    if product_name.is_empty() {
        return String::new();
    }

    let mut normalized = product_name.to_lowercase().trim().to_string();
    normalized = NON_WORD.replace_all(&normalized, " ").into_owned();

    for (pattern, replacement) in REPLACEMENTS.iter() {
        normalized = pattern.replace_all(&normalized, *replacement).into_owned();
    }

    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract meaningful keywords: normalized words longer than two characters,
/// stop words removed.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    normalize_product_name(text)
        .split_whitespace()
        .filter(|word| word.len() > 2 && !STOP_WORDS.contains(word))
        .map(|word| word.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips() {
        assert_eq!(
            normalize_product_name("Bitcoin @ $100k?!"),
            "bitcoin 100k?!"
        );
    }

    #[test]
    fn test_normalize_applies_synonyms() {
        assert_eq!(
            normalize_product_name("GOP wins Senate"),
            "republican party victory us senate"
        );
        assert_eq!(
            normalize_product_name("Trump elected"),
            "donald trump victory"
        );
    }

    #[test]
    fn test_normalize_word_boundaries_only() {
        // "winner" must not trigger the "win" replacement
        let normalized = normalize_product_name("winner takes all");
        assert!(normalized.starts_with("winner"));
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_product_name(""), "");
    }

    #[test]
    fn test_extract_keywords_filters_stop_words() {
        let keywords = extract_keywords("Will the Democrats control the Senate?");
        assert!(keywords.contains("democratic"));
        assert!(keywords.contains("majority"));
        assert!(!keywords.contains("the"));
        assert!(!keywords.contains("will"));
    }

    #[test]
    fn test_extract_keywords_drops_short_words() {
        let keywords = extract_keywords("AI by 2030");
        assert!(!keywords.contains("ai"));
        assert!(keywords.contains("2030"));
    }
}
