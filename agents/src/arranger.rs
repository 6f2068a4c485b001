//! Data Arrangement agent

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::agent::{
    Agent, AgentConfig, AgentContext, AgentReport, AgentStatus, ControlMessage, ControlResponse,
};
use common::io::read_json;
use common::{PipelineError, UnifiedDataset};
use report_generation::reports::{
    build_comprehensive, build_simple, sort_comprehensive, sort_simple,
};
use report_generation::{analysis, ReportWriter};

pub struct ArrangerAgent {
    config: AgentConfig,
    status: Arc<RwLock<AgentStatus>>,
}

impl ArrangerAgent {
    pub fn new() -> Self {
        Self {
            config: AgentConfig {
                agent_id: "data-arranger".to_string(),
                name: "Data Arrangement Agent".to_string(),
                enabled: true,
            },
            status: Arc::new(RwLock::new(AgentStatus::Idle)),
        }
    }
}

impl Default for ArrangerAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for ArrangerAgent {
    fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn status(&self) -> AgentStatus {
        self.status
            .try_read()
            .map(|s| *s)
            .unwrap_or(AgentStatus::Running)
    }

    async fn execute(&self, ctx: &AgentContext) -> anyhow::Result<AgentReport> {
        *self.status.write().await = AgentStatus::Running;

        let result = async {
            let dataset: UnifiedDataset = read_json(
                &ctx.paths.unified_data(),
                "run product identification first",
            )?;

            if dataset.unified_products.is_empty() {
                return Err(PipelineError::EmptyDataset.into());
            }

            info!(
                "Processing {} unified product groups",
                dataset.unified_groups
            );

            let mut comprehensive = build_comprehensive(&dataset.unified_products);
            sort_comprehensive(&mut comprehensive);

            let mut simple = build_simple(&comprehensive);
            sort_simple(&mut simple);

            let processing_metadata = serde_json::json!({
                "processing_timestamp": dataset.processing_timestamp,
                "original_markets": dataset.original_markets,
                "unified_groups": dataset.unified_groups,
                "compression_ratio": dataset.compression_ratio,
                "high_confidence_matches": dataset.high_confidence_matches,
            });
            let reports = analysis::build(&comprehensive, processing_metadata);

            let writer = ReportWriter::new(ctx.paths.clone());
            writer.write_all(&comprehensive, &simple, &reports)?;

            info!(
                "Data arrangement completed: {} products processed",
                comprehensive.len()
            );

            let output_files: Vec<String> = vec![
                ctx.paths.final_products(),
                ctx.paths.comprehensive(),
                ctx.paths.simple(),
                ctx.paths.analysis_reports(),
                ctx.paths.summary_statistics(),
            ]
            .into_iter()
            .map(|p| p.display().to_string())
            .collect();

            Ok(AgentReport::new(
                self.config.agent_id.clone(),
                format!("arranged {} products into reports", comprehensive.len()),
                serde_json::json!({
                    "products_processed": comprehensive.len(),
                    "platforms": reports.covered_platforms(),
                    "categories": reports.category_breakdown.len(),
                    "output_files": output_files,
                }),
            ))
        }
        .await;

        *self.status.write().await = if result.is_ok() {
            AgentStatus::Idle
        } else {
            AgentStatus::Error
        };
        result
    }

    async fn handle_control(&self, msg: ControlMessage) -> anyhow::Result<ControlResponse> {
        match msg {
            ControlMessage::Pause => {
                *self.status.write().await = AgentStatus::Paused;
                Ok(ControlResponse::Ok)
            }
            ControlMessage::Resume => {
                *self.status.write().await = AgentStatus::Idle;
                Ok(ControlResponse::Ok)
            }
            ControlMessage::HealthCheck => Ok(ControlResponse::HealthCheck {
                status: *self.status.read().await,
            }),
        }
    }
}
