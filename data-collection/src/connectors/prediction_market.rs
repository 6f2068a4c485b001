//! Prediction-Market connector
//!
//! The venue exposes no public API; listings come from a curated fixture set.

use tracing::info;

use common::{MarketListing, Platform};

pub struct PredictionMarketConnector;

impl PredictionMarketConnector {
    pub fn new() -> Self {
        Self
    }

    pub fn collect(&self) -> Vec<MarketListing> {
        info!("Starting Prediction-Market scraping");
        let listings = Self::fixtures();
        info!("Scraped {} markets from Prediction-Market", listings.len());
        listings
    }

    pub fn fixtures() -> Vec<MarketListing> {
        vec![
            MarketListing {
                platform: Platform::PredictionMarket,
                product: "Trump elected president 2024?".to_string(),
                price: 0.59,
                volume: 950_000.0,
                category: "Politics".to_string(),
                market_id: "pm_trump_24".to_string(),
                description: "Donald Trump 2024 presidential election prediction".to_string(),
            },
            MarketListing {
                platform: Platform::PredictionMarket,
                product: "Democratic Senate majority 2024".to_string(),
                price: 0.44,
                volume: 450_000.0,
                category: "Politics".to_string(),
                market_id: "pm_sen_24".to_string(),
                description: "Senate majority prediction for Democrats".to_string(),
            },
            MarketListing {
                platform: Platform::PredictionMarket,
                product: "AI reaches AGI by 2030".to_string(),
                price: 0.25,
                volume: 1_800_000.0,
                category: "Technology".to_string(),
                market_id: "pm_agi_30".to_string(),
                description: "Artificial General Intelligence timeline prediction".to_string(),
            },
            MarketListing {
                platform: Platform::PredictionMarket,
                product: "Ethereum above $5000 by 2025".to_string(),
                price: 0.41,
                volume: 750_000.0,
                category: "Crypto".to_string(),
                market_id: "pm_eth_25".to_string(),
                description: "Ethereum price prediction market".to_string(),
            },
        ]
    }
}

impl Default for PredictionMarketConnector {
    fn default() -> Self {
        Self::new()
    }
}
