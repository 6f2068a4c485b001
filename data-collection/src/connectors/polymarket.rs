//! Polymarket Gamma API connector
//!
//! Pulls current events from the public Gamma REST API. Each event bundles
//! several markets; we take the top markets of the top events.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::{coerce_f64, truncate_chars};
use common::{MarketListing, Platform};

const GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";
const MAX_DESCRIPTION_CHARS: usize = 200;

pub struct PolymarketConnector {
    client: Client,
    base_url: String,
    max_events: usize,
    max_markets_per_event: usize,
}

/// Event from the Gamma `/events` endpoint
#[derive(Debug, Deserialize)]
struct GammaEvent {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    markets: Vec<GammaMarket>,
}

/// Market inside a Gamma event; price fields arrive as strings or numbers
#[derive(Debug, Deserialize)]
struct GammaMarket {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "lastPrice")]
    last_price: Option<Value>,
    #[serde(default)]
    volume: Option<Value>,
}

impl PolymarketConnector {
    pub fn new(client: Client, max_events: usize, max_markets_per_event: usize) -> Self {
        Self {
            client,
            base_url: GAMMA_API_URL.to_string(),
            max_events,
            max_markets_per_event,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Fetch listings, falling back to fixtures when the API is unreachable.
    pub async fn collect(&self) -> Vec<MarketListing> {
        info!("Starting Polymarket scraping");
        match self.fetch().await {
            Ok(markets) => {
                info!("Scraped {} markets from Polymarket", markets.len());
                markets
            }
            Err(e) => {
                warn!("Polymarket scraping failed: {}, using fixture data", e);
                Self::fixtures()
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<MarketListing>> {
        let url = format!("{}/events", self.base_url);
        let events: Vec<GammaEvent> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut listings = Vec::new();
        for event in events.into_iter().take(self.max_events) {
            let title = event.title.unwrap_or_else(|| "Unknown Event".to_string());
            let category = event.category.unwrap_or_else(|| "General".to_string());
            let description =
                truncate_chars(event.description.as_deref().unwrap_or(""), MAX_DESCRIPTION_CHARS);

            for market in event.markets.into_iter().take(self.max_markets_per_event) {
                listings.push(MarketListing {
                    platform: Platform::Polymarket,
                    product: title.clone(),
                    price: coerce_f64(market.last_price.as_ref(), 0.5),
                    volume: coerce_f64(market.volume.as_ref(), 0.0),
                    category: category.clone(),
                    market_id: market.id.unwrap_or_default(),
                    description: description.clone(),
                });
            }
        }

        Ok(listings)
    }

    /// Built-in listings used when the live API cannot be reached.
    pub fn fixtures() -> Vec<MarketListing> {
        vec![
            MarketListing {
                platform: Platform::Polymarket,
                product: "Will Trump win 2024 presidential election?".to_string(),
                price: 0.62,
                volume: 1_500_000.0,
                category: "Politics".to_string(),
                market_id: "mock_poly_1".to_string(),
                description: "Prediction market for 2024 US Presidential election outcome"
                    .to_string(),
            },
            MarketListing {
                platform: Platform::Polymarket,
                product: "Will Democrats control Senate after 2024?".to_string(),
                price: 0.48,
                volume: 800_000.0,
                category: "Politics".to_string(),
                market_id: "mock_poly_2".to_string(),
                description: "Senate control prediction for 2024 elections".to_string(),
            },
            MarketListing {
                platform: Platform::Polymarket,
                product: "Bitcoin above $100k by end of 2025?".to_string(),
                price: 0.35,
                volume: 2_100_000.0,
                category: "Crypto".to_string(),
                market_id: "mock_poly_3".to_string(),
                description: "Bitcoin price prediction market".to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gamma_event() {
        let json = r#"{
            "title": "US Presidential Election 2024",
            "category": "Politics",
            "description": "Who will win?",
            "markets": [
                {"id": "123", "lastPrice": "0.62", "volume": 1500000},
                {"id": "124", "lastPrice": 0.38, "volume": "900000"}
            ]
        }"#;

        let event: GammaEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.title.as_deref(), Some("US Presidential Election 2024"));
        assert_eq!(event.markets.len(), 2);
        assert_eq!(coerce_f64(event.markets[0].last_price.as_ref(), 0.5), 0.62);
        assert_eq!(coerce_f64(event.markets[1].last_price.as_ref(), 0.5), 0.38);
        assert_eq!(coerce_f64(event.markets[1].volume.as_ref(), 0.0), 900000.0);
    }

    #[test]
    fn test_parse_event_with_missing_fields() {
        let event: GammaEvent = serde_json::from_str(r#"{"markets": [{}]}"#).unwrap();
        assert!(event.title.is_none());
        assert_eq!(coerce_f64(event.markets[0].last_price.as_ref(), 0.5), 0.5);
    }

    #[test]
    fn test_fixtures_are_polymarket() {
        let fixtures = PolymarketConnector::fixtures();
        assert_eq!(fixtures.len(), 3);
        assert!(fixtures.iter().all(|l| l.platform == Platform::Polymarket));
        assert!(fixtures.iter().all(|l| l.price > 0.0 && l.price < 1.0));
    }
}
