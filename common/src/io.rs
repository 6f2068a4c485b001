//! JSON file helpers shared by the stage crates

use crate::error::PipelineError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read and deserialize a JSON file, mapping a missing file to
/// `PipelineError::MissingInput` with the given hint.
pub fn read_json<T: DeserializeOwned>(path: &Path, hint: &str) -> Result<T, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::missing_input(path, hint));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Serialize a value as pretty-printed JSON and write it, creating parent
/// directories as needed.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::path::PathBuf;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: u32,
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("crowdwisdom-io-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let path = temp_path("roundtrip.json");
        let sample = Sample {
            name: "markets".to_string(),
            value: 21,
        };

        write_json_pretty(&path, &sample).unwrap();
        let back: Sample = read_json(&path, "should exist").unwrap();
        assert_eq!(back, sample);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_missing_file_is_missing_input() {
        let path = temp_path("does-not-exist.json");
        let result: Result<Sample, _> = read_json(&path, "run collection first");
        match result {
            Err(PipelineError::MissingInput { hint, .. }) => {
                assert_eq!(hint, "run collection first");
            }
            other => panic!("expected MissingInput, got {:?}", other.map(|_| ())),
        }
    }
}
