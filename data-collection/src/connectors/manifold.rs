//! Manifold Markets connector
//!
//! Pulls binary markets from the public v0 API. Manifold reports a plain
//! `probability` field, so no price conversion is needed.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use common::{MarketListing, Platform};

const MANIFOLD_API_URL: &str = "https://api.manifold.markets/v0";

pub struct ManifoldConnector {
    client: Client,
    base_url: String,
    max_markets: usize,
}

#[derive(Debug, Deserialize)]
struct ManifoldMarket {
    #[serde(default)]
    id: String,
    #[serde(default)]
    question: String,
    #[serde(default)]
    probability: Option<f64>,
    #[serde(default)]
    volume: Option<f64>,
    #[serde(default, rename = "outcomeType")]
    outcome_type: String,
}

impl ManifoldConnector {
    pub fn new(client: Client, max_markets: usize) -> Self {
        Self {
            client,
            base_url: MANIFOLD_API_URL.to_string(),
            max_markets,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Fetch listings, falling back to fixtures when the API is unreachable.
    pub async fn collect(&self) -> Vec<MarketListing> {
        info!("Starting Manifold Markets scraping");
        match self.fetch().await {
            Ok(markets) => {
                info!("Scraped {} markets from Manifold Markets", markets.len());
                markets
            }
            Err(e) => {
                warn!("Manifold scraping failed: {}, using fixture data", e);
                Self::fixtures()
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<MarketListing>> {
        let url = format!("{}/markets?limit={}", self.base_url, self.max_markets);
        let markets: Vec<ManifoldMarket> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let listings = markets
            .into_iter()
            .filter(|m| m.outcome_type == "BINARY")
            .map(|market| MarketListing {
                platform: Platform::Manifold,
                product: market.question,
                price: market.probability.unwrap_or(0.5),
                volume: market.volume.unwrap_or(0.0),
                category: "General".to_string(),
                market_id: market.id,
                description: String::new(),
            })
            .collect();

        Ok(listings)
    }

    /// Built-in listings used when the live API cannot be reached.
    pub fn fixtures() -> Vec<MarketListing> {
        vec![
            MarketListing {
                platform: Platform::Manifold,
                product: "Will there be a US recession in 2025?".to_string(),
                price: 0.32,
                volume: 680_000.0,
                category: "Economics".to_string(),
                market_id: "mf_recession_25".to_string(),
                description: "US economic recession prediction for 2025".to_string(),
            },
            MarketListing {
                platform: Platform::Manifold,
                product: "Republican wins 2024 election".to_string(),
                price: 0.61,
                volume: 1_100_000.0,
                category: "Politics".to_string(),
                market_id: "mf_gop_24".to_string(),
                description: "GOP victory in 2024 presidential race".to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifold_market() {
        let json = r#"[
            {
                "id": "abc123",
                "question": "Will SpaceX reach Mars by 2030?",
                "probability": 0.18,
                "volume": 4200.5,
                "outcomeType": "BINARY"
            },
            {
                "id": "def456",
                "question": "Which team wins the cup?",
                "outcomeType": "MULTIPLE_CHOICE"
            }
        ]"#;

        let markets: Vec<ManifoldMarket> = serde_json::from_str(json).unwrap();
        assert_eq!(markets.len(), 2);
        assert_eq!(markets[0].probability, Some(0.18));

        let binary: Vec<_> = markets
            .into_iter()
            .filter(|m| m.outcome_type == "BINARY")
            .collect();
        assert_eq!(binary.len(), 1);
        assert_eq!(binary[0].question, "Will SpaceX reach Mars by 2030?");
    }

    #[test]
    fn test_fixtures_are_manifold() {
        let fixtures = ManifoldConnector::fixtures();
        assert_eq!(fixtures.len(), 2);
        assert!(fixtures.iter().all(|l| l.platform == Platform::Manifold));
    }
}
