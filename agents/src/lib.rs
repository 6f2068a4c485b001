//! Pipeline agents
//!
//! The pipeline runs as three specialist agents behind a shared trait:
//! - `CollectorAgent` scrapes the venues into `raw_data.json`
//! - `IdentifierAgent` unifies listings into `unified_data.json`
//! - `ArrangerAgent` renders the CSV/JSON report set
//!
//! The `Orchestrator` registers the agents and runs them in order with
//! per-step timing and first-failure abort.

pub mod agent;
pub mod arranger;
pub mod collector;
pub mod identifier;
pub mod orchestrator;

pub use agent::{
    Agent, AgentConfig, AgentContext, AgentReport, AgentStatus, ControlMessage, ControlResponse,
};
pub use arranger::ArrangerAgent;
pub use collector::CollectorAgent;
pub use identifier::IdentifierAgent;
pub use orchestrator::{Orchestrator, PipelineSummary, StepOutcome};
