//! Pipeline error taxonomy

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by pipeline stages.
///
/// Stage-internal failures (HTTP, parse) are handled inside the stages with
/// fallbacks; these variants are the ones that abort a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("required input file not found: {path} ({hint})")]
    MissingInput { path: PathBuf, hint: String },

    #[error("dataset contains no market listings")]
    EmptyDataset,

    #[error("data collection failed: {0}")]
    Collection(String),

    #[error("product identification failed: {0}")]
    Matching(String),

    #[error("report generation failed: {0}")]
    Report(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn missing_input(path: impl Into<PathBuf>, hint: impl Into<String>) -> Self {
        Self::MissingInput {
            path: path.into(),
            hint: hint.into(),
        }
    }
}
