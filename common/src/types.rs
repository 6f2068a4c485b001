//! Core market data model
//!
//! A `MarketListing` is one question scraped from one venue. Listings are
//! collected into a `RawDataset`, unified across venues into `UnifiedProduct`
//! groups, and the groups are wrapped in a `UnifiedDataset` together with the
//! processing metadata downstream reports rely on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Prediction-market venues covered by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Polymarket,
    Kalshi,
    #[serde(rename = "Prediction-Market")]
    PredictionMarket,
    Manifold,
}

impl Platform {
    /// The name used in serialized output and report columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Polymarket => "Polymarket",
            Platform::Kalshi => "Kalshi",
            Platform::PredictionMarket => "Prediction-Market",
            Platform::Manifold => "Manifold",
        }
    }

    /// All venues in collection order.
    pub fn all() -> [Platform; 4] {
        [
            Platform::Polymarket,
            Platform::Kalshi,
            Platform::PredictionMarket,
            Platform::Manifold,
        ]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One market question as scraped from a single venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketListing {
    /// Venue the listing came from
    pub platform: Platform,
    /// The market question, e.g. "Will X happen by 2025?"
    pub product: String,
    /// Implied probability of the YES outcome, 0.0..=1.0
    pub price: f64,
    /// Reported trading volume (venue units, treated as comparable)
    pub volume: f64,
    /// Venue-reported category, "General" when absent
    pub category: String,
    /// Venue-local identifier (ticker, slug, or numeric id)
    pub market_id: String,
    /// Short description, truncated to 200 characters at collection time
    pub description: String,
}

/// Everything written to `raw_data.json`: the listings plus collection metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDataset {
    pub collection_timestamp: DateTime<Utc>,
    pub total_markets: usize,
    /// Distinct source names, in order of first appearance
    pub sources: Vec<String>,
    /// Distinct categories, in order of first appearance
    pub categories: Vec<String>,
    pub data: Vec<MarketListing>,
}

impl RawDataset {
    /// Wrap collected listings with derived metadata.
    pub fn build(data: Vec<MarketListing>) -> Self {
        let mut sources = Vec::new();
        let mut categories = Vec::new();
        for listing in &data {
            let source = listing.platform.as_str().to_string();
            if !sources.contains(&source) {
                sources.push(source);
            }
            if !categories.contains(&listing.category) {
                categories.push(listing.category.clone());
            }
        }

        Self {
            collection_timestamp: Utc::now(),
            total_markets: data.len(),
            sources,
            categories,
            data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One venue's listing inside a unified product group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEntry {
    /// The question text as that venue phrased it
    pub original_product: String,
    pub price: f64,
    pub volume: f64,
    pub category: String,
    pub market_id: String,
    pub description: String,
}

impl PlatformEntry {
    pub fn from_listing(listing: &MarketListing) -> Self {
        Self {
            original_product: listing.product.clone(),
            price: listing.price,
            volume: listing.volume,
            category: listing.category.clone(),
            market_id: listing.market_id.clone(),
            description: listing.description.clone(),
        }
    }
}

/// A group of listings judged to describe the same real-world event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedProduct {
    /// Minimum confidence across the pairwise matches that formed the group;
    /// 1.0 for singleton groups
    pub confidence: f64,
    pub match_reasoning: String,
    pub product_count: usize,
    /// Listings keyed by venue name; a venue can contribute several listings
    pub platforms: BTreeMap<String, Vec<PlatformEntry>>,
}

/// Everything written to `unified_data.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedDataset {
    pub processing_timestamp: DateTime<Utc>,
    pub original_markets: usize,
    pub unified_groups: usize,
    /// unified_groups / original_markets, rounded to 3 decimal places
    pub compression_ratio: f64,
    /// Number of groups with confidence above 0.8
    pub high_confidence_matches: usize,
    /// Metadata carried over from the raw dataset
    pub original_metadata: serde_json::Value,
    /// Groups keyed by their unified product name
    pub unified_products: BTreeMap<String, UnifiedProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(platform: Platform, product: &str, category: &str) -> MarketListing {
        MarketListing {
            platform,
            product: product.to_string(),
            price: 0.5,
            volume: 1000.0,
            category: category.to_string(),
            market_id: "m1".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_platform_serialization() {
        let json = serde_json::to_string(&Platform::PredictionMarket).unwrap();
        assert_eq!(json, "\"Prediction-Market\"");

        let back: Platform = serde_json::from_str("\"Prediction-Market\"").unwrap();
        assert_eq!(back, Platform::PredictionMarket);
    }

    #[test]
    fn test_raw_dataset_build_derives_metadata() {
        let dataset = RawDataset::build(vec![
            listing(Platform::Polymarket, "Q1", "Politics"),
            listing(Platform::Polymarket, "Q2", "Crypto"),
            listing(Platform::Kalshi, "Q3", "Politics"),
        ]);

        assert_eq!(dataset.total_markets, 3);
        assert_eq!(dataset.sources, vec!["Polymarket", "Kalshi"]);
        assert_eq!(dataset.categories, vec!["Politics", "Crypto"]);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_platform_entry_from_listing() {
        let l = listing(Platform::Manifold, "Will it rain?", "Weather");
        let entry = PlatformEntry::from_listing(&l);
        assert_eq!(entry.original_product, "Will it rain?");
        assert_eq!(entry.price, 0.5);
        assert_eq!(entry.category, "Weather");
    }
}
