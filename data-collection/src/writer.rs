//! Raw dataset persistence

use std::path::Path;

use common::io::{read_json, write_json_pretty};
use common::{PipelineError, RawDataset};

pub fn write_raw_dataset(dataset: &RawDataset, path: &Path) -> Result<(), PipelineError> {
    write_json_pretty(path, dataset)
}

pub fn load_raw_dataset(path: &Path) -> Result<RawDataset, PipelineError> {
    read_json(path, "run data collection first")
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{MarketListing, Platform};
    use std::path::PathBuf;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("crowdwisdom-raw-{}.json", std::process::id()))
    }

    #[test]
    fn test_raw_dataset_round_trip() {
        let dataset = RawDataset::build(vec![MarketListing {
            platform: Platform::Kalshi,
            product: "Test market".to_string(),
            price: 0.4,
            volume: 100.0,
            category: "General".to_string(),
            market_id: "T-1".to_string(),
            description: String::new(),
        }]);

        let path = temp_path();
        write_raw_dataset(&dataset, &path).unwrap();
        let back = load_raw_dataset(&path).unwrap();
        assert_eq!(back.total_markets, 1);
        assert_eq!(back.data[0].product, "Test market");

        std::fs::remove_file(&path).ok();
    }
}
