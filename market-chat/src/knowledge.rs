//! Knowledge base construction from pipeline outputs
//!
//! Each unified product, raw listing, and analysis section becomes one
//! `Document` with searchable content and flat string metadata.

use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::{info, warn};

use common::io::read_json;
use common::{OutputPaths, RawDataset, UnifiedDataset};

#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub doc_type: String,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
pub struct KnowledgeBase {
    documents: Vec<Document>,
}

impl KnowledgeBase {
    /// Build from whatever output files exist; missing files are skipped.
    /// Fails only when no documents can be built at all.
    pub fn load(paths: &OutputPaths) -> Result<Self> {
        let mut documents = Vec::new();

        match read_json::<UnifiedDataset>(&paths.unified_data(), "run the pipeline first") {
            Ok(unified) => {
                documents.extend(unified_docs(&unified));
                info!("Loaded {} for knowledge base", paths.unified_data().display());
            }
            Err(e) => warn!("Skipping unified data: {}", e),
        }

        match read_json::<RawDataset>(&paths.raw_data(), "run the pipeline first") {
            Ok(raw) => {
                documents.extend(raw_docs(&raw));
                info!("Loaded {} for knowledge base", paths.raw_data().display());
            }
            Err(e) => warn!("Skipping raw data: {}", e),
        }

        match read_json::<serde_json::Value>(&paths.analysis_reports(), "run the pipeline first") {
            Ok(reports) => {
                documents.extend(analysis_docs(&reports));
                info!(
                    "Loaded {} for knowledge base",
                    paths.analysis_reports().display()
                );
            }
            Err(e) => warn!("Skipping analysis reports: {}", e),
        }

        if documents.is_empty() {
            bail!("no prediction market data found; run the pipeline first");
        }

        info!("Knowledge base built with {} documents", documents.len());
        Ok(Self { documents })
    }

    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn unified_docs(dataset: &UnifiedDataset) -> Vec<Document> {
    let mut documents = Vec::new();

    for (product_name, product) in &dataset.unified_products {
        let mut content = String::new();
        let _ = writeln!(content, "Product: {}", product_name);
        let _ = writeln!(content, "Confidence Score: {}", product.confidence);
        let _ = writeln!(
            content,
            "Available Platforms: {}",
            product
                .platforms
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
        let _ = writeln!(content, "\nPlatform Details:");

        for (platform, entries) in &product.platforms {
            if let Some(entry) = entries.first() {
                let _ = writeln!(content, "- {}:", platform);
                let _ = writeln!(content, "  Price: {}", entry.price);
                let _ = writeln!(content, "  Volume: {}", entry.volume);
                let _ = writeln!(content, "  Category: {}", entry.category);
                let _ = writeln!(content, "  Market ID: {}", entry.market_id);
            }
        }

        let mut metadata = BTreeMap::new();
        metadata.insert("product_name".to_string(), product_name.clone());
        metadata.insert("confidence".to_string(), product.confidence.to_string());
        metadata.insert(
            "platforms".to_string(),
            product
                .platforms
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        );
        metadata.insert(
            "platform_count".to_string(),
            product.platforms.len().to_string(),
        );

        documents.push(Document {
            content: content.trim().to_string(),
            doc_type: "unified_market".to_string(),
            metadata,
        });
    }

    documents
}

fn raw_docs(dataset: &RawDataset) -> Vec<Document> {
    dataset
        .data
        .iter()
        .map(|listing| {
            let mut content = String::new();
            let _ = writeln!(content, "Market: {}", listing.product);
            let _ = writeln!(content, "Platform: {}", listing.platform);
            let _ = writeln!(content, "Price: {}", listing.price);
            let _ = writeln!(content, "Volume: {}", listing.volume);
            let _ = writeln!(content, "Category: {}", listing.category);
            let _ = writeln!(content, "Description: {}", listing.description);
            let _ = writeln!(content, "Market ID: {}", listing.market_id);

            let mut metadata = BTreeMap::new();
            metadata.insert("platform".to_string(), listing.platform.to_string());
            metadata.insert("category".to_string(), listing.category.clone());
            metadata.insert("market_name".to_string(), listing.product.clone());

            Document {
                content: content.trim().to_string(),
                doc_type: "raw_market".to_string(),
                metadata,
            }
        })
        .collect()
}

fn analysis_docs(reports: &serde_json::Value) -> Vec<Document> {
    let mut documents = Vec::new();

    if let Some(coverage) = reports.get("platform_coverage").and_then(|v| v.as_object()) {
        let mut content = String::from("Platform Coverage Analysis:\n");
        for (platform, stats) in coverage {
            let count = stats.get("count").and_then(|v| v.as_u64()).unwrap_or(0);
            let volume = stats
                .get("total_volume")
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let _ = writeln!(
                content,
                "- {}: {} markets, Total Volume: {}",
                platform, count, volume
            );
        }

        let mut metadata = BTreeMap::new();
        metadata.insert("category".to_string(), "platform_coverage".to_string());
        documents.push(Document {
            content,
            doc_type: "analysis".to_string(),
            metadata,
        });
    }

    if let Some(categories) = reports.get("category_breakdown").and_then(|v| v.as_object()) {
        let mut content = String::from("Category Breakdown:\n");
        for (category, count) in categories {
            let _ = writeln!(content, "- {}: {} markets", category, count);
        }

        let mut metadata = BTreeMap::new();
        metadata.insert("category".to_string(), "category_breakdown".to_string());
        documents.push(Document {
            content,
            doc_type: "analysis".to_string(),
            metadata,
        });
    }

    documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{MarketListing, Platform, PlatformEntry, UnifiedProduct};
    use std::collections::BTreeMap as Map;

    fn sample_unified() -> UnifiedDataset {
        let mut platforms: Map<String, Vec<PlatformEntry>> = Map::new();
        platforms.insert(
            "Polymarket".to_string(),
            vec![PlatformEntry {
                original_product: "Will Bitcoin hit $100k?".to_string(),
                price: 0.35,
                volume: 2_100_000.0,
                category: "Crypto".to_string(),
                market_id: "poly-btc".to_string(),
                description: String::new(),
            }],
        );

        let mut unified_products = Map::new();
        unified_products.insert(
            "Bitcoin above $100k".to_string(),
            UnifiedProduct {
                confidence: 0.9,
                match_reasoning: "test".to_string(),
                product_count: 1,
                platforms,
            },
        );

        UnifiedDataset {
            processing_timestamp: chrono::Utc::now(),
            original_markets: 1,
            unified_groups: 1,
            compression_ratio: 1.0,
            high_confidence_matches: 1,
            original_metadata: serde_json::json!({}),
            unified_products,
        }
    }

    #[test]
    fn test_unified_docs_content() {
        let docs = unified_docs(&sample_unified());
        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert_eq!(doc.doc_type, "unified_market");
        assert!(doc.content.contains("Product: Bitcoin above $100k"));
        assert!(doc.content.contains("Polymarket"));
        assert!(doc.content.contains("Price: 0.35"));
        assert_eq!(doc.metadata["platform_count"], "1");
    }

    #[test]
    fn test_raw_docs_content() {
        let dataset = RawDataset::build(vec![MarketListing {
            platform: Platform::Kalshi,
            product: "Fed cuts in March".to_string(),
            price: 0.34,
            volume: 52_000.0,
            category: "Economics".to_string(),
            market_id: "FED-MAR".to_string(),
            description: "Rate decision".to_string(),
        }]);

        let docs = raw_docs(&dataset);
        assert_eq!(docs.len(), 1);
        assert!(docs[0].content.contains("Platform: Kalshi"));
        assert_eq!(docs[0].metadata["category"], "Economics");
    }

    #[test]
    fn test_analysis_docs_from_reports() {
        let reports = serde_json::json!({
            "platform_coverage": {
                "Polymarket": {"count": 3, "total_volume": 4400000.0}
            },
            "category_breakdown": {
                "Politics": 5
            }
        });

        let docs = analysis_docs(&reports);
        assert_eq!(docs.len(), 2);
        assert!(docs[0].content.contains("Polymarket: 3 markets"));
        assert!(docs[1].content.contains("Politics: 5 markets"));
    }
}
