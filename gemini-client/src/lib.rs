//! Pure Gemini REST API client
//!
//! A minimal client for Google's `generateContent` endpoint with no
//! domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::from_env()?;
//! let answer = client.generate_text("Summarize prediction markets in one line.").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::{
    Candidate, ChatTurn, Content, GenerateRequest, GenerateResponse, GenerationConfig, Part, Role,
};

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Minimum plausible length of a real API key.
const MIN_API_KEY_LEN: usize = 30;
const PLACEHOLDER_API_KEY: &str = "your-actual-gemini-api-key-here";

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        validate_api_key(&api_key)?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model used for generation.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a `generateContent` request and return the first candidate's text.
    pub async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let start = std::time::Instant::now();
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generation complete"
        );

        body.first_text().ok_or(GeminiError::Empty)
    }

    /// Single-turn generation from a plain prompt.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.generate(GenerateRequest::from_prompt(prompt)).await
    }

    /// Single-turn generation with sampling controls.
    pub async fn generate_with_config(
        &self,
        prompt: &str,
        temperature: f64,
        max_output_tokens: u32,
    ) -> Result<String> {
        let request = GenerateRequest::from_prompt(prompt).with_generation_config(
            GenerationConfig {
                temperature: Some(temperature),
                max_output_tokens: Some(max_output_tokens),
            },
        );
        self.generate(request).await
    }

    /// Multi-turn chat: sends the history plus the new user message.
    pub async fn chat(&self, history: &[ChatTurn], message: &str, temperature: f64) -> Result<String> {
        let mut turns = history.to_vec();
        turns.push(ChatTurn::user(message));
        let request = GenerateRequest::from_turns(&turns).with_generation_config(
            GenerationConfig {
                temperature: Some(temperature),
                max_output_tokens: None,
            },
        );
        self.generate(request).await
    }
}

/// Check that an API key looks real before spending requests on it.
pub fn validate_api_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(GeminiError::Config("API key is empty".into()));
    }
    if key == PLACEHOLDER_API_KEY {
        return Err(GeminiError::Config(
            "API key is still the placeholder value".into(),
        ));
    }
    if key.len() < MIN_API_KEY_LEN {
        return Err(GeminiError::Config(format!(
            "API key appears to be invalid (shorter than {} characters)",
            MIN_API_KEY_LEN
        )));
    }
    Ok(())
}

/// Extract the first JSON object embedded in a model reply.
///
/// Models wrap JSON in prose and code fences; this takes the span from the
/// first `{` to the last `}`, which tolerates both.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("k".repeat(40))
            .with_base_url("https://custom.api.com")
            .with_model("gemini-test");

        assert_eq!(client.base_url, "https://custom.api.com");
        assert_eq!(client.model, "gemini-test");
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key(&"x".repeat(40)).is_ok());
        assert!(validate_api_key("").is_err());
        assert!(validate_api_key("your-actual-gemini-api-key-here").is_err());
        assert!(validate_api_key("too-short").is_err());
    }

    #[test]
    fn test_extract_json_object_plain() {
        let text = r#"{"same_event": true, "confidence": 0.9}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_extract_json_object_fenced() {
        let text = "Here is my answer:\n```json\n{\"same_event\": false}\n```\nDone.";
        assert_eq!(extract_json_object(text), Some("{\"same_event\": false}"));
    }

    #[test]
    fn test_extract_json_object_none() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }
}
