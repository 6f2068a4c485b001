//! Orchestrator - runs the stage agents in pipeline order
//!
//! Agents register by id; `run_pipeline` executes them in registration order
//! with per-step banners and timing, aborting on the first failure so later
//! stages never run against stale inputs.

use anyhow::{bail, Result};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::agent::{Agent, AgentContext, AgentReport};

pub struct Orchestrator {
    agents: DashMap<String, Arc<dyn Agent>>,
    /// Execution order (registration order)
    order: Vec<String>,
    ctx: AgentContext,
}

/// Result of one pipeline step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub name: String,
    pub duration_secs: f64,
    pub report: AgentReport,
}

/// Result of a complete pipeline run
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub steps: Vec<StepOutcome>,
    pub total_secs: f64,
}

impl Orchestrator {
    pub fn new(ctx: AgentContext) -> Self {
        Self {
            agents: DashMap::new(),
            order: Vec::new(),
            ctx,
        }
    }

    /// Register an agent; it runs after all previously registered agents.
    pub fn register(&mut self, agent: Arc<dyn Agent>) {
        let agent_id = agent.config().agent_id.clone();
        info!("Registering agent: {}", agent_id);
        self.order.push(agent_id.clone());
        self.agents.insert(agent_id, agent);
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Run every enabled agent in order. Fails fast: the first failing step
    /// aborts the run with the step name in the error.
    pub async fn run_pipeline(&self) -> Result<PipelineSummary> {
        let total_steps = self.order.len();
        if total_steps == 0 {
            bail!("no agents registered");
        }

        info!("{:=^60}", "");
        info!("{:^60}", "PIPELINE START");
        info!("{:=^60}", "");

        let pipeline_start = Instant::now();
        let mut steps = Vec::new();

        for (index, agent_id) in self.order.iter().enumerate() {
            let agent = match self.agents.get(agent_id) {
                Some(entry) => entry.value().clone(),
                None => bail!("registered agent {} disappeared", agent_id),
            };

            let name = agent.config().name.clone();
            if !agent.config().enabled {
                info!("Skipping disabled agent: {}", name);
                continue;
            }

            info!("{:=^60}", "");
            info!("STEP {}/{}: {}", index + 1, total_steps, name.to_uppercase());
            info!("{:=^60}", "");

            let step_start = Instant::now();
            match agent.execute(&self.ctx).await {
                Ok(report) => {
                    let duration_secs = step_start.elapsed().as_secs_f64();
                    info!(
                        "Step {} completed successfully in {:.2} seconds: {}",
                        index + 1,
                        duration_secs,
                        report.summary
                    );
                    steps.push(StepOutcome {
                        name,
                        duration_secs,
                        report,
                    });
                }
                Err(e) => {
                    let duration_secs = step_start.elapsed().as_secs_f64();
                    error!(
                        "Step {} failed after {:.2} seconds: {}",
                        index + 1,
                        duration_secs,
                        e
                    );
                    bail!("pipeline failed at step {} ({}): {}", index + 1, name, e);
                }
            }
        }

        let total_secs = pipeline_start.elapsed().as_secs_f64();
        info!("Pipeline completed successfully in {:.2} seconds", total_secs);
        self.log_output_files();

        Ok(PipelineSummary { steps, total_secs })
    }

    /// Log each expected output file with its size, flagging missing ones.
    fn log_output_files(&self) {
        info!("Output files generated:");
        for (path, description) in self.ctx.paths.report_files() {
            match std::fs::metadata(&path) {
                Ok(meta) => info!(
                    "  {} | {} | {} bytes",
                    path.display(),
                    description,
                    meta.len()
                ),
                Err(_) => info!("  {} | {} | missing", path.display(), description),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{
        AgentConfig, AgentStatus, ControlMessage, ControlResponse,
    };
    use async_trait::async_trait;
    use common::PipelineConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingAgent {
        config: AgentConfig,
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl RecordingAgent {
        fn new(id: &str, calls: Arc<AtomicUsize>, fail: bool) -> Self {
            Self {
                config: AgentConfig {
                    agent_id: id.to_string(),
                    name: id.to_string(),
                    enabled: true,
                },
                calls,
                fail,
            }
        }
    }

    #[async_trait]
    impl Agent for RecordingAgent {
        fn config(&self) -> &AgentConfig {
            &self.config
        }

        fn status(&self) -> AgentStatus {
            AgentStatus::Idle
        }

        async fn execute(&self, _ctx: &AgentContext) -> anyhow::Result<AgentReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("boom");
            }
            Ok(AgentReport::new(
                self.config.agent_id.clone(),
                "ok",
                serde_json::json!({}),
            ))
        }

        async fn handle_control(&self, _msg: ControlMessage) -> anyhow::Result<ControlResponse> {
            Ok(ControlResponse::Ok)
        }
    }

    fn ctx() -> AgentContext {
        AgentContext::new(PipelineConfig::default(), None)
    }

    #[tokio::test]
    async fn test_pipeline_runs_agents_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut orchestrator = Orchestrator::new(ctx());
        orchestrator.register(Arc::new(RecordingAgent::new("one", calls.clone(), false)));
        orchestrator.register(Arc::new(RecordingAgent::new("two", calls.clone(), false)));

        let summary = orchestrator.run_pipeline().await.unwrap();
        assert_eq!(summary.steps.len(), 2);
        assert_eq!(summary.steps[0].name, "one");
        assert_eq!(summary.steps[1].name, "two");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_pipeline_aborts_on_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut orchestrator = Orchestrator::new(ctx());
        orchestrator.register(Arc::new(RecordingAgent::new("first", calls.clone(), true)));
        orchestrator.register(Arc::new(RecordingAgent::new("second", calls.clone(), false)));

        let result = orchestrator.run_pipeline().await;
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("step 1"));
        assert!(message.contains("first"));
        // The second agent never ran
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_pipeline_is_an_error() {
        let orchestrator = Orchestrator::new(ctx());
        assert!(orchestrator.run_pipeline().await.is_err());
    }

    #[tokio::test]
    async fn test_disabled_agents_are_skipped() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut disabled = RecordingAgent::new("disabled", calls.clone(), false);
        disabled.config.enabled = false;

        let mut orchestrator = Orchestrator::new(ctx());
        orchestrator.register(Arc::new(disabled));

        let summary = orchestrator.run_pipeline().await.unwrap();
        assert!(summary.steps.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
