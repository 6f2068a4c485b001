//! Kalshi trade API connector
//!
//! Pulls active markets from the public v2 trade API. Kalshi prices are in
//! cents; listings carry implied probability, so `yes_bid` is divided by 100.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::{coerce_f64, truncate_chars};
use common::{MarketListing, Platform};

const TRADE_API_URL: &str = "https://trading-api.kalshi.com/trade-api/v2";
const MAX_DESCRIPTION_CHARS: usize = 200;

pub struct KalshiConnector {
    client: Client,
    base_url: String,
    max_markets: usize,
}

#[derive(Debug, Deserialize)]
struct MarketsResponse {
    #[serde(default)]
    markets: Vec<KalshiMarket>,
}

#[derive(Debug, Deserialize)]
struct KalshiMarket {
    #[serde(default)]
    title: Option<String>,
    /// Best YES bid in cents
    #[serde(default)]
    yes_bid: Option<Value>,
    #[serde(default)]
    volume: Option<Value>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    ticker: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
}

impl KalshiConnector {
    pub fn new(client: Client, max_markets: usize) -> Self {
        Self {
            client,
            base_url: TRADE_API_URL.to_string(),
            max_markets,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Fetch listings, falling back to fixtures when the API is unreachable.
    pub async fn collect(&self) -> Vec<MarketListing> {
        info!("Starting Kalshi scraping");
        match self.fetch().await {
            Ok(markets) => {
                info!("Scraped {} markets from Kalshi", markets.len());
                markets
            }
            Err(e) => {
                warn!("Kalshi scraping failed: {}, using fixture data", e);
                Self::fixtures()
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<MarketListing>> {
        let url = format!("{}/markets", self.base_url);
        let response: MarketsResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let listings = response
            .markets
            .into_iter()
            .take(self.max_markets)
            .map(|market| MarketListing {
                platform: Platform::Kalshi,
                product: market.title.unwrap_or_else(|| "Unknown Market".to_string()),
                // Cents to implied probability
                price: coerce_f64(market.yes_bid.as_ref(), 50.0) / 100.0,
                volume: coerce_f64(market.volume.as_ref(), 0.0),
                category: market.category.unwrap_or_else(|| "General".to_string()),
                market_id: market.ticker.unwrap_or_default(),
                description: truncate_chars(
                    market.subtitle.as_deref().unwrap_or(""),
                    MAX_DESCRIPTION_CHARS,
                ),
            })
            .collect();

        Ok(listings)
    }

    /// Built-in listings used when the live API cannot be reached.
    pub fn fixtures() -> Vec<MarketListing> {
        vec![
            MarketListing {
                platform: Platform::Kalshi,
                product: "Republican to win 2024 presidential election".to_string(),
                price: 0.58,
                volume: 1_200_000.0,
                category: "Politics".to_string(),
                market_id: "PRES-24".to_string(),
                description: "2024 Presidential election Republican victory".to_string(),
            },
            MarketListing {
                platform: Platform::Kalshi,
                product: "Democrats to control US Senate in 2025".to_string(),
                price: 0.46,
                volume: 600_000.0,
                category: "Politics".to_string(),
                market_id: "SEN-24".to_string(),
                description: "Democratic Senate control prediction".to_string(),
            },
            MarketListing {
                platform: Platform::Kalshi,
                product: "S&P 500 above 6000 by Dec 2025".to_string(),
                price: 0.72,
                volume: 900_000.0,
                category: "Economics".to_string(),
                market_id: "SPX-25".to_string(),
                description: "Stock market prediction for S&P 500".to_string(),
            },
        ]
    }
}
