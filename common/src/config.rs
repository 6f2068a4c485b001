//! Pipeline configuration
//!
//! Every tunable the stages use lives here, loadable from a TOML file and
//! fully defaulted so the pipeline runs without one.

use serde::{Deserialize, Serialize};

/// Top-level configuration for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Data collection limits and pacing
    #[serde(default)]
    pub collection: CollectionConfig,

    /// Product matching thresholds and LLM settings
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Report output settings
    #[serde(default)]
    pub reports: ReportConfig,

    /// Chat interface settings
    #[serde(default)]
    pub chat: ChatConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            collection: CollectionConfig::default(),
            matching: MatchingConfig::default(),
            reports: ReportConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

/// Data collection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Maximum events/markets fetched per platform
    #[serde(default = "default_max_events")]
    pub max_events_per_platform: usize,

    /// Maximum markets taken from a single event (Polymarket events bundle several)
    #[serde(default = "default_max_markets_per_event")]
    pub max_markets_per_event: usize,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Delay between sources, keeps request rates polite
    #[serde(default = "default_source_delay")]
    pub source_delay_secs: u64,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            max_events_per_platform: 15,
            max_markets_per_event: 2,
            request_timeout_secs: 15,
            source_delay_secs: 2,
        }
    }
}

fn default_max_events() -> usize {
    15
}

fn default_max_markets_per_event() -> usize {
    2
}

fn default_request_timeout() -> u64 {
    15
}

fn default_source_delay() -> u64 {
    2
}

/// Product matching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum confidence for two listings to merge into one group
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    /// Groups above this confidence count as high-confidence matches
    #[serde(default = "default_high_confidence_threshold")]
    pub high_confidence_threshold: f64,

    /// Weight of keyword (Jaccard) similarity in the rule-based score
    #[serde(default = "default_jaccard_weight")]
    pub jaccard_weight: f64,

    /// Weight of character sequence similarity in the rule-based score
    #[serde(default = "default_sequence_weight")]
    pub sequence_weight: f64,

    /// Gemini model used for semantic match judgments
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for match judgments (low, answers must be stable)
    #[serde(default = "default_match_temperature")]
    pub temperature: f64,

    /// Token cap per match judgment
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.65,
            high_confidence_threshold: 0.8,
            jaccard_weight: 0.7,
            sequence_weight: 0.3,
            model: "gemini-2.0-flash-exp".to_string(),
            temperature: 0.1,
            max_output_tokens: 500,
        }
    }
}

fn default_match_threshold() -> f64 {
    0.65
}

fn default_high_confidence_threshold() -> f64 {
    0.8
}

fn default_jaccard_weight() -> f64 {
    0.7
}

fn default_sequence_weight() -> f64 {
    0.3
}

fn default_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_match_temperature() -> f64 {
    0.1
}

fn default_max_output_tokens() -> u32 {
    500
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory all pipeline artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: "outputs".to_string(),
        }
    }
}

fn default_output_dir() -> String {
    "outputs".to_string()
}

/// Chat interface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Documents retrieved as context per question
    #[serde(default = "default_retrieval_k")]
    pub retrieval_k: usize,

    /// Sampling temperature for conversational answers
    #[serde(default = "default_chat_temperature")]
    pub temperature: f64,

    /// Conversation turns kept in the rolling history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            retrieval_k: 5,
            temperature: 0.7,
            history_limit: 10,
        }
    }
}

fn default_retrieval_k() -> usize {
    5
}

fn default_chat_temperature() -> f64 {
    0.7
}

fn default_history_limit() -> usize {
    10
}

/// Load configuration from a TOML file
pub fn load_config(path: &str) -> anyhow::Result<PipelineConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: PipelineConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &PipelineConfig, path: &str) -> anyhow::Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Create a default configuration file template
pub fn create_config_template(path: &str) -> anyhow::Result<()> {
    let template = "# CrowdWisdom Pipeline Configuration

[collection]
# Maximum events/markets fetched per platform
max_events_per_platform = 15

# Maximum markets taken from a single event
max_markets_per_event = 2

# HTTP request timeout (seconds)
request_timeout_secs = 15

# Delay between sources (seconds)
source_delay_secs = 2

[matching]
# Minimum confidence for two listings to merge
match_threshold = 0.65

# Groups above this confidence count as high-confidence
high_confidence_threshold = 0.8

# Rule-based score weights
jaccard_weight = 0.7
sequence_weight = 0.3

# Gemini model for semantic match judgments
model = \"gemini-2.0-flash-exp\"
temperature = 0.1
max_output_tokens = 500

[reports]
# Directory all pipeline artifacts are written to
output_dir = \"outputs\"

[chat]
# Documents retrieved as context per question
retrieval_k = 5

# Sampling temperature for conversational answers
temperature = 0.7

# Conversation turns kept in the rolling history
history_limit = 10
";

    std::fs::write(path, template)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.collection.max_events_per_platform, 15);
        assert_eq!(config.matching.match_threshold, 0.65);
        assert_eq!(config.reports.output_dir, "outputs");
        assert_eq!(config.chat.retrieval_k, 5);
    }

    #[test]
    fn test_config_serialization() {
        let config = PipelineConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: PipelineConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(
            config.matching.match_threshold,
            deserialized.matching.match_threshold
        );
        assert_eq!(config.matching.model, deserialized.matching.model);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PipelineConfig = toml::from_str(
            "[matching]\nmatch_threshold = 0.75\n",
        )
        .unwrap();
        assert_eq!(config.matching.match_threshold, 0.75);
        // Unspecified fields fall back to defaults
        assert_eq!(config.matching.jaccard_weight, 0.7);
        assert_eq!(config.collection.max_events_per_platform, 15);
    }
}
