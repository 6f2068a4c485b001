//! Base Agent trait and core agent types
//!
//! All pipeline stage agents implement the Agent trait for consistency and
//! orchestration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{OutputPaths, PipelineConfig};
use gemini_client::GeminiClient;

/// Base configuration for any agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub agent_id: String,
    pub name: String,
    pub enabled: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_id: Uuid::new_v4().to_string(),
            name: "UnnamedAgent".to_string(),
            enabled: true,
        }
    }
}

/// Shared state every agent executes against
#[derive(Clone)]
pub struct AgentContext {
    pub config: PipelineConfig,
    pub paths: OutputPaths,
    /// Present when a valid API key was configured; agents degrade to
    /// non-LLM paths without it
    pub gemini: Option<GeminiClient>,
}

impl AgentContext {
    pub fn new(config: PipelineConfig, gemini: Option<GeminiClient>) -> Self {
        let paths = OutputPaths::new(&config.reports.output_dir);
        Self {
            config,
            paths,
            gemini,
        }
    }
}

/// Result of one agent execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReport {
    pub agent_id: String,
    pub summary: String,
    /// Stage-specific counters and file names
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl AgentReport {
    pub fn new(agent_id: impl Into<String>, summary: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            agent_id: agent_id.into(),
            summary: summary.into(),
            data,
            timestamp: Utc::now(),
        }
    }
}

/// Current status of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentStatus {
    Idle,
    Running,
    Error,
    Paused,
}

/// Base trait that all pipeline stage agents must implement
#[async_trait]
pub trait Agent: Send + Sync {
    /// Get the agent's configuration
    fn config(&self) -> &AgentConfig;

    /// Get the current status of the agent
    fn status(&self) -> AgentStatus;

    /// Run the agent's pipeline stage to completion
    async fn execute(&self, ctx: &AgentContext) -> anyhow::Result<AgentReport>;

    /// Handle a control message from the orchestrator
    async fn handle_control(&self, msg: ControlMessage) -> anyhow::Result<ControlResponse>;
}

/// Control messages from orchestrator to agents
#[derive(Debug, Clone)]
pub enum ControlMessage {
    Pause,
    Resume,
    HealthCheck,
}

/// Response to control messages
#[derive(Debug, Clone)]
pub enum ControlResponse {
    Ok,
    Error(String),
    HealthCheck { status: AgentStatus },
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DummyAgent {
        config: AgentConfig,
    }

    #[async_trait]
    impl Agent for DummyAgent {
        fn config(&self) -> &AgentConfig {
            &self.config
        }

        fn status(&self) -> AgentStatus {
            AgentStatus::Idle
        }

        async fn execute(&self, _ctx: &AgentContext) -> anyhow::Result<AgentReport> {
            Ok(AgentReport::new(
                self.config.agent_id.clone(),
                "noop",
                serde_json::json!({}),
            ))
        }

        async fn handle_control(&self, _msg: ControlMessage) -> anyhow::Result<ControlResponse> {
            Ok(ControlResponse::Ok)
        }
    }

    #[test]
    fn test_agent_config_default() {
        let config = AgentConfig::default();
        assert!(config.enabled);
        assert_eq!(config.name, "UnnamedAgent");
        assert!(!config.agent_id.is_empty());
    }

    #[tokio::test]
    async fn test_dummy_agent_executes() {
        let agent = DummyAgent {
            config: AgentConfig::default(),
        };
        let ctx = AgentContext::new(PipelineConfig::default(), None);
        let report = agent.execute(&ctx).await.unwrap();
        assert_eq!(report.summary, "noop");
    }
}
