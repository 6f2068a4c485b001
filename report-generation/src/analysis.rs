//! Platform and category analysis reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::reports::ComprehensiveRow;

/// Confidence bucket labels, highest first.
pub const CONFIDENCE_HIGH: &str = "High (0.8-1.0)";
pub const CONFIDENCE_MEDIUM: &str = "Medium (0.6-0.8)";
pub const CONFIDENCE_LOW: &str = "Low (0.0-0.6)";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformCoverage {
    pub count: usize,
    pub total_volume: f64,
}

/// Everything written to `analysis_reports.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReports {
    pub platform_coverage: BTreeMap<String, PlatformCoverage>,
    pub category_breakdown: BTreeMap<String, usize>,
    pub confidence_distribution: BTreeMap<String, usize>,
    pub total_products: usize,
    pub processing_metadata: serde_json::Value,
    pub generation_timestamp: DateTime<Utc>,
}

/// Build analysis reports from the comprehensive rows.
pub fn build(rows: &[ComprehensiveRow], processing_metadata: serde_json::Value) -> AnalysisReports {
    let mut platform_coverage: BTreeMap<String, PlatformCoverage> = BTreeMap::new();
    for name in ["Polymarket", "Kalshi", "Prediction_Market", "Manifold"] {
        platform_coverage.insert(name.to_string(), PlatformCoverage::default());
    }

    let mut category_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut confidence_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for bucket in [CONFIDENCE_HIGH, CONFIDENCE_MEDIUM, CONFIDENCE_LOW] {
        confidence_distribution.insert(bucket.to_string(), 0);
    }

    for row in rows {
        let columns: [(&str, Option<f64>, Option<f64>); 4] = [
            ("Polymarket", row.polymarket_price, row.polymarket_volume),
            ("Kalshi", row.kalshi_price, row.kalshi_volume),
            (
                "Prediction_Market",
                row.prediction_market_price,
                row.prediction_market_volume,
            ),
            ("Manifold", row.manifold_price, row.manifold_volume),
        ];

        for (platform, price, volume) in columns {
            if let Some(stats) = platform_coverage.get_mut(platform) {
                if price.is_some() {
                    stats.count += 1;
                }
                if let Some(v) = volume {
                    stats.total_volume += v;
                }
            }
        }

        *category_breakdown
            .entry(row.primary_category.clone())
            .or_insert(0) += 1;

        let bucket = if row.confidence_score >= 0.8 {
            CONFIDENCE_HIGH
        } else if row.confidence_score >= 0.6 {
            CONFIDENCE_MEDIUM
        } else {
            CONFIDENCE_LOW
        };
        *confidence_distribution.entry(bucket.to_string()).or_insert(0) += 1;
    }

    AnalysisReports {
        platform_coverage,
        category_breakdown,
        confidence_distribution,
        total_products: rows.len(),
        processing_metadata,
        generation_timestamp: Utc::now(),
    }
}

impl AnalysisReports {
    /// Number of platforms that contributed at least one market.
    pub fn covered_platforms(&self) -> usize {
        self.platform_coverage
            .values()
            .filter(|c| c.count > 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::build_comprehensive;
    use common::{PlatformEntry, UnifiedProduct};
    use std::collections::BTreeMap as Map;

    fn row_fixture(confidences: &[f64]) -> Vec<ComprehensiveRow> {
        let mut unified: Map<String, UnifiedProduct> = Map::new();
        for (i, &confidence) in confidences.iter().enumerate() {
            let mut platforms: Map<String, Vec<PlatformEntry>> = Map::new();
            platforms.insert(
                "Polymarket".to_string(),
                vec![PlatformEntry {
                    original_product: format!("q{}", i),
                    price: 0.5,
                    volume: 100.0,
                    category: "Politics".to_string(),
                    market_id: format!("id{}", i),
                    description: String::new(),
                }],
            );
            let product = UnifiedProduct {
                confidence,
                match_reasoning: String::new(),
                product_count: 1,
                platforms,
            };
            unified.insert(format!("product {}", i), product);
        }
        build_comprehensive(&unified)
    }

    #[test]
    fn test_confidence_buckets() {
        let rows = row_fixture(&[0.95, 0.85, 0.7, 0.3]);
        let reports = build(&rows, serde_json::json!({}));

        assert_eq!(reports.confidence_distribution[CONFIDENCE_HIGH], 2);
        assert_eq!(reports.confidence_distribution[CONFIDENCE_MEDIUM], 1);
        assert_eq!(reports.confidence_distribution[CONFIDENCE_LOW], 1);
        assert_eq!(reports.total_products, 4);
    }

    #[test]
    fn test_platform_coverage_counts() {
        let rows = row_fixture(&[0.9, 0.9]);
        let reports = build(&rows, serde_json::json!({}));

        assert_eq!(reports.platform_coverage["Polymarket"].count, 2);
        assert!((reports.platform_coverage["Polymarket"].total_volume - 200.0).abs() < 1e-9);
        assert_eq!(reports.platform_coverage["Kalshi"].count, 0);
        assert_eq!(reports.covered_platforms(), 1);
    }

    #[test]
    fn test_category_breakdown() {
        let rows = row_fixture(&[0.9]);
        let reports = build(&rows, serde_json::json!({}));
        assert_eq!(reports.category_breakdown["Politics"], 1);
    }
}
