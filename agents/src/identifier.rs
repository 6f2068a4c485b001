//! Product Identification agent

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::agent::{
    Agent, AgentConfig, AgentContext, AgentReport, AgentStatus, ControlMessage, ControlResponse,
};
use common::io::write_json_pretty;
use common::PipelineError;
use data_collection::writer::load_raw_dataset;
use product_matching::{MatchJudge, ProductMatcher};

pub struct IdentifierAgent {
    config: AgentConfig,
    status: Arc<RwLock<AgentStatus>>,
}

impl IdentifierAgent {
    pub fn new() -> Self {
        Self {
            config: AgentConfig {
                agent_id: "product-identifier".to_string(),
                name: "Product Identification Agent".to_string(),
                enabled: true,
            },
            status: Arc::new(RwLock::new(AgentStatus::Idle)),
        }
    }
}

impl Default for IdentifierAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for IdentifierAgent {
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
            let raw = load_raw_dataset(&ctx.paths.raw_data())?;
            if raw.is_empty() {
                return Err(PipelineError::EmptyDataset.into());
            }

            info!("Processing {} market entries", raw.total_markets);

            let judge = MatchJudge::new(ctx.gemini.clone(), ctx.config.matching.clone());
            let matcher = ProductMatcher::new(judge);

            let unified_products = matcher.unify(&raw.data).await;
            let dataset = matcher.build_dataset(&raw, unified_products);

            write_json_pretty(&ctx.paths.unified_data(), &dataset)?;
            info!(
                "Product unification completed: {} -> {} groups (compression {})",
                dataset.original_markets, dataset.unified_groups, dataset.compression_ratio
            );

            Ok(AgentReport::new(
                self.config.agent_id.clone(),
                format!(
                    "unified {} markets into {} groups",
                    dataset.original_markets, dataset.unified_groups
                ),
                serde_json::json!({
                    "unified_groups": dataset.unified_groups,
                    "compression_ratio": dataset.compression_ratio,
                    "high_confidence_matches": dataset.high_confidence_matches,
                    "output_file": ctx.paths.unified_data(),
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
