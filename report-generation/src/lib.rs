//! Report generation from unified market data
//!
//! Turns `UnifiedDataset` groups into the analysis-ready outputs: a
//! comprehensive CSV with every computed metric, a simplified comparison
//! table, platform/category analysis reports, and a flattened summary
//! statistics table.

pub mod analysis;
pub mod metrics;
pub mod reports;
pub mod writer;

pub use analysis::AnalysisReports;
pub use metrics::MarketMetrics;
pub use reports::{ComprehensiveRow, SimpleRow};
pub use writer::ReportWriter;
