//! Shared types for the CrowdWisdom market aggregation pipeline
//!
//! Every stage crate depends on this one. It holds:
//! - The market data model (listings, unified product groups, dataset wrappers)
//! - The pipeline error taxonomy
//! - TOML configuration with defaults for every stage
//! - Canonical output file locations

pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod types;

pub use config::{ChatConfig, CollectionConfig, MatchingConfig, PipelineConfig, ReportConfig};
pub use error::PipelineError;
pub use paths::OutputPaths;
pub use types::{
    MarketListing, Platform, PlatformEntry, RawDataset, UnifiedDataset, UnifiedProduct,
};
