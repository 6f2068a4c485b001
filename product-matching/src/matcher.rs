//! Cross-platform product unification
//!
//! Greedy pairwise grouping: each listing not yet claimed starts a group and
//! pulls in every later unclaimed listing the judge scores above the match
//! threshold. Group confidence is the minimum over its merges, so a group is
//! only as trustworthy as its weakest link.

use std::collections::{BTreeMap, HashSet};
use tracing::info;

use crate::llm::MatchJudge;
use common::{MarketListing, PlatformEntry, RawDataset, UnifiedDataset, UnifiedProduct};

pub struct ProductMatcher {
    judge: MatchJudge,
}

impl ProductMatcher {
    pub fn new(judge: MatchJudge) -> Self {
        Self { judge }
    }

    /// Group listings into unified products keyed by unified name.
    ///
    /// Every input listing lands in exactly one group; listings nothing
    /// matches become singleton groups with confidence 1.0.
    pub async fn unify(&self, listings: &[MarketListing]) -> BTreeMap<String, UnifiedProduct> {
        info!("Starting product matching across {} listings", listings.len());

        let threshold = self.judge.config().match_threshold;
        let mut unified: BTreeMap<String, UnifiedProduct> = BTreeMap::new();
        let mut claimed: HashSet<usize> = HashSet::new();
        let mut match_count = 0usize;

        for (i, primary) in listings.iter().enumerate() {
            if claimed.contains(&i) {
                continue;
            }
            claimed.insert(i);

            let mut unified_name = primary.product.clone();
            let mut confidence = 1.0f64;
            let mut reasoning = "Primary product".to_string();
            let mut members: Vec<&MarketListing> = vec![primary];

            for (j, candidate) in listings.iter().enumerate().skip(i + 1) {
                if claimed.contains(&j) {
                    continue;
                }

                let verdict = self.judge.judge(&primary.product, &candidate.product).await;
                if verdict.same_event && verdict.confidence > threshold {
                    info!(
                        "Match found: '{}' <-> '{}' (confidence: {})",
                        truncate(&primary.product, 50),
                        truncate(&candidate.product, 50),
                        verdict.confidence
                    );
                    members.push(candidate);
                    unified_name = verdict.unified_name;
                    confidence = confidence.min(verdict.confidence);
                    reasoning = verdict.reasoning;
                    claimed.insert(j);
                    match_count += 1;
                }
            }

            let mut platforms: BTreeMap<String, Vec<PlatformEntry>> = BTreeMap::new();
            for member in &members {
                platforms
                    .entry(member.platform.as_str().to_string())
                    .or_default()
                    .push(PlatformEntry::from_listing(member));
            }

            unified.insert(
                unified_name,
                UnifiedProduct {
                    confidence: round3(confidence),
                    match_reasoning: reasoning,
                    product_count: members.len(),
                    platforms,
                },
            );
        }

        info!(
            "Product matching completed: {} -> {} unified products ({} matches)",
            listings.len(),
            unified.len(),
            match_count
        );
        unified
    }

    /// Wrap unified groups with processing metadata for `unified_data.json`.
    pub fn build_dataset(
        &self,
        raw: &RawDataset,
        unified_products: BTreeMap<String, UnifiedProduct>,
    ) -> UnifiedDataset {
        let original_markets = raw.total_markets;
        let unified_groups = unified_products.len();
        let high_threshold = self.judge.config().high_confidence_threshold;

        let compression_ratio = if original_markets > 0 {
            round3(unified_groups as f64 / original_markets as f64)
        } else {
            0.0
        };

        let high_confidence_matches = unified_products
            .values()
            .filter(|p| p.confidence > high_threshold)
            .count();

        let original_metadata = serde_json::json!({
            "collection_timestamp": raw.collection_timestamp,
            "total_markets": raw.total_markets,
            "sources": raw.sources,
            "categories": raw.categories,
        });

        UnifiedDataset {
            processing_timestamp: chrono::Utc::now(),
            original_markets,
            unified_groups,
            compression_ratio,
            high_confidence_matches,
            original_metadata,
            unified_products,
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
