use anyhow::Result;
use tracing::{info, Level};

use common::{CollectionConfig, OutputPaths};
use data_collection::writer::write_raw_dataset;
use data_collection::Collector;

/// Standalone collection run: scrape every source and write raw_data.json.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting prediction market data collection service");

    let paths = OutputPaths::default();
    paths.ensure_dir()?;

    let collector = Collector::new(CollectionConfig::default());
    let dataset = collector.collect_all().await;

    if dataset.is_empty() {
        anyhow::bail!("no data collected from any source");
    }

    write_raw_dataset(&dataset, &paths.raw_data())?;
    info!(
        "Saved {} market entries to {}",
        dataset.total_markets,
        paths.raw_data().display()
    );
    info!("Sources: {}", dataset.sources.join(", "));
    info!("Categories: {}", dataset.categories.join(", "));

    Ok(())
}
