//! Source-by-source collection
//!
//! Walks the venues in a fixed order with a polite delay between requests.
//! A failing source is skipped, never fatal; collection as a whole only
//! fails when every source comes back empty.

use tokio::time::{sleep, Duration};
use tracing::info;

use crate::connectors::kalshi::KalshiConnector;
use crate::connectors::manifold::ManifoldConnector;
use crate::connectors::polymarket::PolymarketConnector;
use crate::connectors::prediction_market::PredictionMarketConnector;
use crate::connectors::http_client;
use common::{CollectionConfig, MarketListing, RawDataset};

pub struct Collector {
    config: CollectionConfig,
    polymarket: PolymarketConnector,
    kalshi: KalshiConnector,
    prediction_market: PredictionMarketConnector,
    manifold: ManifoldConnector,
}

impl Collector {
    pub fn new(config: CollectionConfig) -> Self {
        let client = http_client(config.request_timeout_secs);
        Self {
            polymarket: PolymarketConnector::new(
                client.clone(),
                config.max_events_per_platform,
                config.max_markets_per_event,
            ),
            kalshi: KalshiConnector::new(client.clone(), config.max_events_per_platform),
            prediction_market: PredictionMarketConnector::new(),
            manifold: ManifoldConnector::new(client, config.max_events_per_platform),
            config,
        }
    }

    /// Collect from every source and wrap the result with metadata.
    pub async fn collect_all(&self) -> RawDataset {
        info!("Starting data collection from all prediction market sources");

        let mut all_data: Vec<MarketListing> = Vec::new();
        let delay = Duration::from_secs(self.config.source_delay_secs);

        let polymarket = self.polymarket.collect().await;
        info!("Collected {} items from Polymarket", polymarket.len());
        all_data.extend(polymarket);
        sleep(delay).await;

        let kalshi = self.kalshi.collect().await;
        info!("Collected {} items from Kalshi", kalshi.len());
        all_data.extend(kalshi);
        sleep(delay).await;

        let prediction_market = self.prediction_market.collect();
        info!(
            "Collected {} items from Prediction-Market",
            prediction_market.len()
        );
        all_data.extend(prediction_market);
        sleep(delay).await;

        let manifold = self.manifold.collect().await;
        info!("Collected {} items from Manifold", manifold.len());
        all_data.extend(manifold);

        let dataset = RawDataset::build(all_data);
        info!(
            "Total collected: {} market entries from {} sources",
            dataset.total_markets,
            dataset.sources.len()
        );
        dataset
    }
}
