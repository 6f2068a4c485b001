//! Canonical output file locations
//!
//! All pipeline artifacts land in a single output directory (`outputs` by
//! default). Stages address files through this type so the layout is defined
//! in exactly one place.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct OutputPaths {
    dir: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the output directory if it does not exist yet.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Raw scraped listings with collection metadata
    pub fn raw_data(&self) -> PathBuf {
        self.dir.join("raw_data.json")
    }

    /// Unified product groups with matching metadata
    pub fn unified_data(&self) -> PathBuf {
        self.dir.join("unified_data.json")
    }

    /// Main analysis-ready CSV (alias of the simplified table)
    pub fn final_products(&self) -> PathBuf {
        self.dir.join("final_products.csv")
    }

    /// Detailed CSV with all computed metrics
    pub fn comprehensive(&self) -> PathBuf {
        self.dir.join("final_products_comprehensive.csv")
    }

    /// Simplified cross-platform price comparison table
    pub fn simple(&self) -> PathBuf {
        self.dir.join("final_products_simple.csv")
    }

    /// Platform and category analysis
    pub fn analysis_reports(&self) -> PathBuf {
        self.dir.join("analysis_reports.json")
    }

    /// Flattened summary statistics table
    pub fn summary_statistics(&self) -> PathBuf {
        self.dir.join("summary_statistics.csv")
    }

    /// Execution log file
    pub fn app_log(&self) -> PathBuf {
        self.dir.join("app.log")
    }

    /// Every report artifact a complete pipeline run produces, with a short
    /// description for the results summary.
    pub fn report_files(&self) -> Vec<(PathBuf, &'static str)> {
        vec![
            (self.raw_data(), "Raw scraped data with metadata"),
            (self.unified_data(), "Unified product groups"),
            (self.final_products(), "Main analysis-ready CSV"),
            (self.comprehensive(), "Detailed CSV with all metrics"),
            (self.simple(), "Simplified comparison table"),
            (self.analysis_reports(), "Platform & category analysis"),
            (self.summary_statistics(), "Summary statistics table"),
            (self.app_log(), "Complete execution logs"),
        ]
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::new("outputs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_directory() {
        let paths = OutputPaths::new("out");
        assert_eq!(paths.raw_data(), PathBuf::from("out/raw_data.json"));
        assert_eq!(paths.final_products(), PathBuf::from("out/final_products.csv"));
        assert_eq!(paths.report_files().len(), 8);
    }
}
