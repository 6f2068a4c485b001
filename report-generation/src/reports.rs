//! CSV row models
//!
//! Column names are part of the output contract; the serde renames below are
//! the exact headers analysts' spreadsheets expect.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::metrics::{self, MarketMetrics};
use common::{UnifiedProduct, PlatformEntry};

/// One row of `final_products_comprehensive.csv`.
#[derive(Debug, Clone, Serialize)]
pub struct ComprehensiveRow {
    #[serde(rename = "Product_Name")]
    pub product_name: String,
    #[serde(rename = "Confidence_Score")]
    pub confidence_score: f64,
    #[serde(rename = "Product_Count")]
    pub product_count: usize,
    #[serde(rename = "Match_Reasoning")]
    pub match_reasoning: String,

    #[serde(rename = "Polymarket_Price")]
    pub polymarket_price: Option<f64>,
    #[serde(rename = "Kalshi_Price")]
    pub kalshi_price: Option<f64>,
    #[serde(rename = "Prediction_Market_Price")]
    pub prediction_market_price: Option<f64>,
    #[serde(rename = "Manifold_Price")]
    pub manifold_price: Option<f64>,

    #[serde(rename = "Polymarket_Volume")]
    pub polymarket_volume: Option<f64>,
    #[serde(rename = "Kalshi_Volume")]
    pub kalshi_volume: Option<f64>,
    #[serde(rename = "Prediction_Market_Volume")]
    pub prediction_market_volume: Option<f64>,
    #[serde(rename = "Manifold_Volume")]
    pub manifold_volume: Option<f64>,

    #[serde(rename = "Primary_Category")]
    pub primary_category: String,

    #[serde(rename = "Min_Price")]
    pub min_price: Option<f64>,
    #[serde(rename = "Max_Price")]
    pub max_price: Option<f64>,
    #[serde(rename = "Avg_Price")]
    pub avg_price: Option<f64>,
    #[serde(rename = "Price_Spread")]
    pub price_spread: Option<f64>,
    #[serde(rename = "Price_Variance")]
    pub price_variance: Option<f64>,

    #[serde(rename = "Total_Volume")]
    pub total_volume: f64,
    #[serde(rename = "Avg_Volume")]
    pub avg_volume: Option<f64>,
    #[serde(rename = "Max_Volume")]
    pub max_volume: Option<f64>,

    #[serde(rename = "Platform_Count")]
    pub platform_count: usize,
    #[serde(rename = "Available_Platforms")]
    pub available_platforms: String,

    #[serde(rename = "Best_Price_Platform")]
    pub best_price_platform: Option<String>,
    #[serde(rename = "Best_Price_Value")]
    pub best_price_value: Option<f64>,
    #[serde(rename = "Arbitrage_Opportunity")]
    pub arbitrage_opportunity: bool,

    #[serde(rename = "Market_IDs")]
    pub market_ids: String,
}

/// One row of `final_products_simple.csv` (and `final_products.csv`).
#[derive(Debug, Clone, Serialize)]
pub struct SimpleRow {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Polymarket")]
    pub polymarket: String,
    #[serde(rename = "Kalshi")]
    pub kalshi: String,
    #[serde(rename = "Prediction_Market")]
    pub prediction_market: String,
    #[serde(rename = "Manifold")]
    pub manifold: String,
    #[serde(rename = "Best_Price")]
    pub best_price: String,
    #[serde(rename = "Price_Spread")]
    pub price_spread: String,
    #[serde(rename = "Confidence")]
    pub confidence: f64,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Platforms")]
    pub platforms: usize,
}

/// Build comprehensive rows from unified product groups.
pub fn build_comprehensive(
    unified_products: &BTreeMap<String, UnifiedProduct>,
) -> Vec<ComprehensiveRow> {
    unified_products
        .iter()
        .map(|(name, product)| build_row(name, product))
        .collect()
}

fn build_row(name: &str, product: &UnifiedProduct) -> ComprehensiveRow {
    let m: MarketMetrics = metrics::compute(&product.platforms);

    let mut row = ComprehensiveRow {
        product_name: name.to_string(),
        confidence_score: product.confidence,
        product_count: product.product_count,
        match_reasoning: product.match_reasoning.clone(),
        polymarket_price: None,
        kalshi_price: None,
        prediction_market_price: None,
        manifold_price: None,
        polymarket_volume: None,
        kalshi_volume: None,
        prediction_market_volume: None,
        manifold_volume: None,
        primary_category: "General".to_string(),
        min_price: m.price_stats.as_ref().map(|s| s.min_price),
        max_price: m.price_stats.as_ref().map(|s| s.max_price),
        avg_price: m.price_stats.as_ref().map(|s| s.avg_price),
        price_spread: m.price_stats.as_ref().map(|s| s.price_spread),
        price_variance: m.price_stats.as_ref().map(|s| s.price_variance),
        total_volume: m.volume_stats.as_ref().map(|s| s.total_volume).unwrap_or(0.0),
        avg_volume: m.volume_stats.as_ref().map(|s| s.avg_volume),
        max_volume: m.volume_stats.as_ref().map(|s| s.max_volume),
        platform_count: m.platforms_count,
        available_platforms: m.platforms_list.join(", "),
        best_price_platform: m
            .best_opportunity
            .as_ref()
            .map(|b| b.highest_probability_platform.clone()),
        best_price_value: m
            .best_opportunity
            .as_ref()
            .map(|b| b.highest_probability_price),
        arbitrage_opportunity: m
            .best_opportunity
            .as_ref()
            .map(|b| b.arbitrage_opportunity)
            .unwrap_or(false),
        market_ids: String::new(),
    };

    let mut market_ids = Vec::new();
    let mut primary_category: Option<String> = None;

    for (platform, entries) in &product.platforms {
        if let Some(entry) = entries.first() {
            if primary_category.is_none() {
                primary_category = Some(entry.category.clone());
            }
            if !entry.market_id.is_empty() {
                market_ids.push(format!("{}:{}", platform, entry.market_id));
            }
            fill_platform_columns(&mut row, platform, entry);
        }
    }

    row.primary_category = primary_category.unwrap_or_else(|| "General".to_string());
    row.market_ids = market_ids.join(" | ");
    row
}

fn fill_platform_columns(row: &mut ComprehensiveRow, platform: &str, entry: &PlatformEntry) {
    let price = Some(entry.price);
    let volume = Some(entry.volume);
    match platform {
        "Polymarket" => {
            row.polymarket_price = price;
            row.polymarket_volume = volume;
        }
        "Kalshi" => {
            row.kalshi_price = price;
            row.kalshi_volume = volume;
        }
        "Prediction-Market" => {
            row.prediction_market_price = price;
            row.prediction_market_volume = volume;
        }
        "Manifold" => {
            row.manifold_price = price;
            row.manifold_volume = volume;
        }
        _ => {}
    }
}

/// Collapse comprehensive rows into the simplified comparison table.
pub fn build_simple(rows: &[ComprehensiveRow]) -> Vec<SimpleRow> {
    rows.iter()
        .map(|row| SimpleRow {
            product: row.product_name.clone(),
            polymarket: format_price(row.polymarket_price),
            kalshi: format_price(row.kalshi_price),
            prediction_market: format_price(row.prediction_market_price),
            manifold: format_price(row.manifold_price),
            best_price: format_price(row.best_price_value),
            price_spread: format_price(row.price_spread),
            confidence: row.confidence_score,
            category: row.primary_category.clone(),
            platforms: row.platform_count,
        })
        .collect()
}

fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    }
}

/// Sort comprehensive rows: confidence, then total volume, both descending.
pub fn sort_comprehensive(rows: &mut [ComprehensiveRow]) {
    rows.sort_by(|a, b| {
        b.confidence_score
            .total_cmp(&a.confidence_score)
            .then(b.total_volume.total_cmp(&a.total_volume))
    });
}

/// Sort simplified rows by confidence descending.
pub fn sort_simple(rows: &mut [SimpleRow]) {
    rows.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}
