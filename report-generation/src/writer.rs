//! Report file writers

use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::analysis::AnalysisReports;
use crate::reports::{ComprehensiveRow, SimpleRow};
use common::io::write_json_pretty;
use common::{OutputPaths, PipelineError};

/// Flattened summary statistics row.
#[derive(Debug, Serialize)]
struct SummaryRow {
    #[serde(rename = "Metric_Category")]
    metric_category: String,
    #[serde(rename = "Metric_Name")]
    metric_name: String,
    #[serde(rename = "Value")]
    value: String,
}

pub struct ReportWriter {
    paths: OutputPaths,
}

impl ReportWriter {
    pub fn new(paths: OutputPaths) -> Self {
        Self { paths }
    }

    /// Write all five report artifacts.
    pub fn write_all(
        &self,
        comprehensive: &[ComprehensiveRow],
        simple: &[SimpleRow],
        reports: &AnalysisReports,
    ) -> Result<(), PipelineError> {
        self.paths.ensure_dir()?;

        write_csv(&self.paths.comprehensive(), comprehensive)?;
        info!("Saved comprehensive CSV: {}", self.paths.comprehensive().display());

        write_csv(&self.paths.simple(), simple)?;
        info!("Saved simplified CSV: {}", self.paths.simple().display());

        // The main output is the simplified table under its canonical name
        write_csv(&self.paths.final_products(), simple)?;
        info!("Saved main CSV: {}", self.paths.final_products().display());

        write_json_pretty(&self.paths.analysis_reports(), reports)?;
        info!(
            "Saved analysis reports: {}",
            self.paths.analysis_reports().display()
        );

        let summary = flatten_reports(reports)?;
        write_csv(&self.paths.summary_statistics(), &summary)?;
        info!(
            "Saved summary statistics: {}",
            self.paths.summary_statistics().display()
        );

        Ok(())
    }
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), PipelineError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| PipelineError::Report(format!("cannot open {}: {}", path.display(), e)))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| PipelineError::Report(format!("cannot write row: {}", e)))?;
    }
    writer
        .flush()
        .map_err(|e| PipelineError::Report(format!("cannot flush {}: {}", path.display(), e)))?;
    Ok(())
}

/// Flatten the analysis reports into metric rows: nested objects become one
/// row per leaf, scalars one row each.
fn flatten_reports(reports: &AnalysisReports) -> Result<Vec<SummaryRow>, PipelineError> {
    let value = serde_json::to_value(reports)?;
    let object = match value {
        serde_json::Value::Object(map) => map,
        _ => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for (metric, value) in object {
        match value {
            serde_json::Value::Object(sub) => {
                for (name, sub_value) in sub {
                    rows.push(SummaryRow {
                        metric_category: metric.clone(),
                        metric_name: name,
                        value: render_value(&sub_value),
                    });
                }
            }
            other => rows.push(SummaryRow {
                metric_category: "General".to_string(),
                metric_name: metric,
                value: render_value(&other),
            }),
        }
    }
    Ok(rows)
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
