//! Rule-based similarity scoring
//!
//! The fallback path when no LLM is available: keyword (Jaccard) overlap
//! weighted with a Ratcliff-Obershelp character sequence ratio.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::normalize::extract_keywords;
use common::MatchingConfig;

/// Outcome of comparing two market questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchVerdict {
    pub same_event: bool,
    /// 0.0..=1.0
    pub confidence: f64,
    /// Canonical name for the pair when merged
    pub unified_name: String,
    pub reasoning: String,
}

/// Jaccard similarity between two keyword sets.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Ratcliff-Obershelp similarity ratio over lowercased characters:
/// 2 * matching_chars / total_chars, in 0.0..=1.0.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Total matched characters: find the longest common substring, then recurse
/// on the unmatched pieces to its left and right.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (a_start, b_start, len) = longest_common_substring(a, b);
    if len == 0 {
        return 0;
    }

    len + matching_chars(&a[..a_start], &b[..b_start])
        + matching_chars(&a[a_start + len..], &b[b_start + len..])
}

/// Longest common substring via a rolling DP row; returns (start_a, start_b, len).
fn longest_common_substring(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        let mut current = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                current[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = current;
    }

    best
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Score a pair of market questions without an LLM.
pub fn rule_based(product1: &str, product2: &str, config: &MatchingConfig) -> MatchVerdict {
    let keywords1 = extract_keywords(product1);
    let keywords2 = extract_keywords(product2);

    let jaccard_similarity = jaccard(&keywords1, &keywords2);
    let sequence_similarity = sequence_ratio(product1, product2);

    let combined = jaccard_similarity * config.jaccard_weight
        + sequence_similarity * config.sequence_weight;

    let same_event = combined > config.match_threshold;

    // The shorter phrasing tends to be the cleaner product name
    let unified_name = if product1.len() <= product2.len() {
        product1.to_string()
    } else {
        product2.to_string()
    };

    MatchVerdict {
        same_event,
        confidence: round3(combined),
        unified_name,
        reasoning: format!(
            "Rule-based matching: {:.2} keyword + {:.2} sequence similarity",
            jaccard_similarity, sequence_similarity
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_jaccard_basic() {
        let a = keywords(&["bitcoin", "100k", "2025"]);
        let b = keywords(&["bitcoin", "100k", "december"]);
        // 2 shared / 4 total
        assert!((jaccard(&a, &b) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_jaccard_empty_sets() {
        assert_eq!(jaccard(&HashSet::new(), &HashSet::new()), 0.0);
    }

    #[test]
    fn test_sequence_ratio_identical() {
        assert!((sequence_ratio("same text", "same text") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sequence_ratio_disjoint() {
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_sequence_ratio_known_value() {
        // Longest common substring "bcd" (3 chars), nothing else matches:
        // 2 * 3 / 8 = 0.75
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_sequence_ratio_case_insensitive() {
        assert!((sequence_ratio("Bitcoin", "BITCOIN") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rule_based_identical_questions() {
        let config = MatchingConfig::default();
        let verdict = rule_based(
            "Will Bitcoin reach $100k in 2025?",
            "Will Bitcoin reach $100k in 2025?",
            &config,
        );
        assert!(verdict.same_event);
        assert!((verdict.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rule_based_unrelated_questions() {
        let config = MatchingConfig::default();
        let verdict = rule_based(
            "Will Bitcoin reach $100k in 2025?",
            "Next James Bond actor announced by June?",
            &config,
        );
        assert!(!verdict.same_event);
        assert!(verdict.confidence < 0.5);
    }

    #[test]
    fn test_rule_based_prefers_shorter_name() {
        let config = MatchingConfig::default();
        let verdict = rule_based("Trump wins 2024", "Will Trump win the 2024 election?", &config);
        assert_eq!(verdict.unified_name, "Trump wins 2024");
    }
}
