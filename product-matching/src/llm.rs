//! LLM match judge
//!
//! Asks Gemini whether two market questions describe the same underlying
//! event. The reply must be a JSON object; anything else (transport errors,
//! malformed JSON, missing fields) falls back to rule-based scoring.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::similarity::{rule_based, MatchVerdict};
use common::MatchingConfig;
use gemini_client::{extract_json_object, GeminiClient};

pub struct MatchJudge {
    client: Option<GeminiClient>,
    config: MatchingConfig,
}

/// JSON shape the judge prompt asks for
#[derive(Debug, Deserialize)]
struct LlmVerdict {
    same_event: bool,
    confidence: f64,
    unified_name: String,
    #[serde(default)]
    reasoning: Option<String>,
}

impl MatchJudge {
    /// Judge backed by Gemini; `client` of `None` scores rule-based only.
    pub fn new(client: Option<GeminiClient>, config: MatchingConfig) -> Self {
        let client = client.map(|c| {
            let model = config.model.clone();
            c.with_model(model)
        });
        Self { client, config }
    }

    pub fn rule_based_only(config: MatchingConfig) -> Self {
        Self {
            client: None,
            config,
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Compare two market questions and return a verdict. Never fails: every
    /// LLM problem degrades to the rule-based path.
    pub async fn judge(&self, product1: &str, product2: &str) -> MatchVerdict {
        let client = match &self.client {
            Some(client) => client,
            None => return rule_based(product1, product2, &self.config),
        };

        match self.judge_with_llm(client, product1, product2).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(
                    "LLM similarity calculation failed: {}, using rule-based fallback",
                    e
                );
                rule_based(product1, product2, &self.config)
            }
        }
    }

    async fn judge_with_llm(
        &self,
        client: &GeminiClient,
        product1: &str,
        product2: &str,
    ) -> anyhow::Result<MatchVerdict> {
        let prompt = build_prompt(product1, product2);
        let reply = client
            .generate_with_config(&prompt, self.config.temperature, self.config.max_output_tokens)
            .await?;

        let json = extract_json_object(&reply)
            .ok_or_else(|| anyhow::anyhow!("no JSON object in LLM reply"))?;
        let parsed: LlmVerdict = serde_json::from_str(json)?;

        debug!(
            same_event = parsed.same_event,
            confidence = parsed.confidence,
            "LLM match verdict"
        );

        Ok(MatchVerdict {
            same_event: parsed.same_event,
            confidence: parsed.confidence.clamp(0.0, 1.0),
            unified_name: if parsed.unified_name.is_empty() {
                product1.to_string()
            } else {
                parsed.unified_name
            },
            reasoning: parsed
                .reasoning
                .unwrap_or_else(|| "AI-powered matching".to_string()),
        })
    }
}

fn build_prompt(product1: &str, product2: &str) -> String {
    format!(
        r#"You are an expert prediction market analyst. Compare these two prediction market questions and determine if they refer to the same underlying event.

Question 1: "{product1}"
Question 2: "{product2}"

Consider:
- Semantic meaning and intent
- Time periods mentioned
- Specific entities (people, organizations)
- Market outcomes being predicted
- Logical equivalence even with different wording

Respond with valid JSON only:
{{
    "same_event": true/false,
    "confidence": 0.0-1.0,
    "unified_name": "standardized event name",
    "reasoning": "brief explanation"
}}

Examples of same events:
- "Trump wins 2024" and "Republican victory 2024 presidential election" = same (if Trump is nominee)
- "Bitcoin above $100k" and "BTC over $100,000" = same
- "Democrats control Senate" and "Democratic Senate majority" = same"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_both_questions() {
        let prompt = build_prompt("Q one?", "Q two?");
        assert!(prompt.contains("Q one?"));
        assert!(prompt.contains("Q two?"));
        assert!(prompt.contains("same_event"));
    }

    #[test]
    fn test_parse_llm_verdict_from_fenced_reply() {
        let reply = "Sure, here is the comparison:\n```json\n{\"same_event\": true, \"confidence\": 0.92, \"unified_name\": \"Trump wins 2024\", \"reasoning\": \"Same race\"}\n```";
        let json = extract_json_object(reply).unwrap();
        let verdict: LlmVerdict = serde_json::from_str(json).unwrap();
        assert!(verdict.same_event);
        assert!((verdict.confidence - 0.92).abs() < 1e-9);
        assert_eq!(verdict.unified_name, "Trump wins 2024");
    }

    #[test]
    fn test_parse_llm_verdict_without_reasoning() {
        let json = r#"{"same_event": false, "confidence": 0.2, "unified_name": "x"}"#;
        let verdict: LlmVerdict = serde_json::from_str(json).unwrap();
        assert!(!verdict.same_event);
        assert!(verdict.reasoning.is_none());
    }

    #[tokio::test]
    async fn test_judge_without_client_uses_rules() {
        let judge = MatchJudge::rule_based_only(MatchingConfig::default());
        let verdict = judge.judge("Same question", "Same question").await;
        assert!(verdict.same_event);
        assert!(verdict.reasoning.starts_with("Rule-based"));
    }
}
