//! Data Collection agent

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::agent::{
    Agent, AgentConfig, AgentContext, AgentReport, AgentStatus, ControlMessage, ControlResponse,
};
use common::PipelineError;
use data_collection::writer::write_raw_dataset;
use data_collection::Collector;

pub struct CollectorAgent {
    config: AgentConfig,
    status: Arc<RwLock<AgentStatus>>,
}

impl CollectorAgent {
    pub fn new() -> Self {
        Self {
            config: AgentConfig {
                agent_id: "data-collector".to_string(),
                name: "Data Collection Agent".to_string(),
                enabled: true,
            },
            status: Arc::new(RwLock::new(AgentStatus::Idle)),
        }
    }
}

impl Default for CollectorAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for CollectorAgent {
    fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn status(&self) -> AgentStatus {
        // A held write lock means the agent is mid-execution
        self.status
            .try_read()
            .map(|s| *s)
            .unwrap_or(AgentStatus::Running)
    }

    async fn execute(&self, ctx: &AgentContext) -> anyhow::Result<AgentReport> {
        *self.status.write().await = AgentStatus::Running;

        let result = async {
            ctx.paths.ensure_dir()?;

            let collector = Collector::new(ctx.config.collection.clone());
            let dataset = collector.collect_all().await;

            if dataset.is_empty() {
                return Err(PipelineError::EmptyDataset.into());
            }

            write_raw_dataset(&dataset, &ctx.paths.raw_data())?;
            info!(
                "Collected and saved {} market entries",
                dataset.total_markets
            );

            Ok(AgentReport::new(
                self.config.agent_id.clone(),
                format!(
                    "collected {} markets from {} sources",
                    dataset.total_markets,
                    dataset.sources.len()
                ),
                serde_json::json!({
                    "markets_collected": dataset.total_markets,
                    "sources": dataset.sources,
                    "categories": dataset.categories,
                    "output_file": ctx.paths.raw_data(),
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
