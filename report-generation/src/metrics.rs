//! Per-group market metrics
//!
//! Computed from the first listing each platform contributes to a group.
//! A price spread above `ARBITRAGE_SPREAD_THRESHOLD` across platforms marks
//! an arbitrage opportunity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use common::PlatformEntry;

/// Minimum cross-platform price spread that counts as arbitrage.
pub const ARBITRAGE_SPREAD_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceStats {
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    /// max - min when more than one platform has a price, else 0
    pub price_spread: f64,
    /// Population variance of the prices
    pub price_variance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeStats {
    pub total_volume: f64,
    pub avg_volume: f64,
    pub max_volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestOpportunity {
    /// Platform quoting the highest YES probability
    pub highest_probability_platform: String,
    pub highest_probability_price: f64,
    pub arbitrage_opportunity: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketMetrics {
    pub price_stats: Option<PriceStats>,
    pub volume_stats: Option<VolumeStats>,
    pub platforms_count: usize,
    pub platforms_list: Vec<String>,
    pub best_opportunity: Option<BestOpportunity>,
}

/// Compute metrics for one unified group.
pub fn compute(platforms: &BTreeMap<String, Vec<PlatformEntry>>) -> MarketMetrics {
    let mut prices = Vec::new();
    let mut volumes = Vec::new();
    let mut platform_prices: Vec<(String, f64)> = Vec::new();

    for (platform, entries) in platforms {
        // Several listings from one venue collapse to the first
        if let Some(entry) = entries.first() {
            if entry.price > 0.0 {
                prices.push(entry.price);
                platform_prices.push((platform.clone(), entry.price));
            }
            if entry.volume > 0.0 {
                volumes.push(entry.volume);
            }
        }
    }

    let price_stats = if prices.is_empty() {
        None
    } else {
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let avg = prices.iter().sum::<f64>() / prices.len() as f64;
        let spread = if prices.len() > 1 { max - min } else { 0.0 };
        let variance =
            prices.iter().map(|p| (p - avg).powi(2)).sum::<f64>() / prices.len() as f64;

        Some(PriceStats {
            min_price: min,
            max_price: max,
            avg_price: avg,
            price_spread: spread,
            price_variance: variance,
        })
    };

    let volume_stats = if volumes.is_empty() {
        None
    } else {
        Some(VolumeStats {
            total_volume: volumes.iter().sum(),
            avg_volume: volumes.iter().sum::<f64>() / volumes.len() as f64,
            max_volume: volumes.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        })
    };

    let best_opportunity = platform_prices
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(platform, price)| {
            let spread = price_stats.as_ref().map(|s| s.max_price - s.min_price);
            BestOpportunity {
                highest_probability_platform: platform.clone(),
                highest_probability_price: *price,
                arbitrage_opportunity: spread
                    .map(|s| s > ARBITRAGE_SPREAD_THRESHOLD)
                    .unwrap_or(false),
            }
        });

    MarketMetrics {
        price_stats,
        volume_stats,
        platforms_count: platforms.len(),
        platforms_list: platforms.keys().cloned().collect(),
        best_opportunity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(price: f64, volume: f64) -> PlatformEntry {
        PlatformEntry {
            original_product: "q".to_string(),
            price,
            volume,
            category: "General".to_string(),
            market_id: "id".to_string(),
            description: String::new(),
        }
    }

    fn platforms(entries: &[(&str, f64, f64)]) -> BTreeMap<String, Vec<PlatformEntry>> {
        entries
            .iter()
            .map(|(name, price, volume)| (name.to_string(), vec![entry(*price, *volume)]))
            .collect()
    }

    #[test]
    fn test_price_stats_two_platforms() {
        let m = compute(&platforms(&[
            ("Polymarket", 0.62, 1000.0),
            ("Kalshi", 0.58, 500.0),
        ]));

        let prices = m.price_stats.unwrap();
        assert!((prices.min_price - 0.58).abs() < 1e-9);
        assert!((prices.max_price - 0.62).abs() < 1e-9);
        assert!((prices.avg_price - 0.60).abs() < 1e-9);
        assert!((prices.price_spread - 0.04).abs() < 1e-9);

        let volumes = m.volume_stats.unwrap();
        assert!((volumes.total_volume - 1500.0).abs() < 1e-9);
        assert!((volumes.max_volume - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_arbitrage_flagged_above_threshold() {
        let m = compute(&platforms(&[
            ("Polymarket", 0.70, 100.0),
            ("Kalshi", 0.55, 100.0),
        ]));
        let best = m.best_opportunity.unwrap();
        assert!(best.arbitrage_opportunity);
        assert_eq!(best.highest_probability_platform, "Polymarket");
        assert!((best.highest_probability_price - 0.70).abs() < 1e-9);
    }

    #[test]
    fn test_no_arbitrage_below_threshold() {
        let m = compute(&platforms(&[
            ("Polymarket", 0.60, 100.0),
            ("Kalshi", 0.58, 100.0),
        ]));
        assert!(!m.best_opportunity.unwrap().arbitrage_opportunity);
    }

    #[test]
    fn test_single_platform_has_zero_spread() {
        let m = compute(&platforms(&[("Manifold", 0.45, 100.0)]));
        let prices = m.price_stats.unwrap();
        assert_eq!(prices.price_spread, 0.0);
        assert!(!m.best_opportunity.unwrap().arbitrage_opportunity);
    }

    #[test]
    fn test_zero_prices_are_skipped() {
        let m = compute(&platforms(&[("Polymarket", 0.0, 0.0)]));
        assert!(m.price_stats.is_none());
        assert!(m.volume_stats.is_none());
        assert!(m.best_opportunity.is_none());
        assert_eq!(m.platforms_count, 1);
    }
}
