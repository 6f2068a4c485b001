//! Platform connectors

pub mod kalshi;
pub mod manifold;
pub mod polymarket;
pub mod prediction_market;

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Browser-like User-Agent; some venues reject default library agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Shared HTTP client with a request timeout and browser UA.
pub fn http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_default()
}

/// Coerce a loosely-typed JSON field to f64.
///
/// Venues disagree on whether prices and volumes are numbers or strings;
/// anything unparseable takes the default.
pub fn coerce_f64(value: Option<&Value>, default: f64) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(Value::String(s)) => s.parse().unwrap_or(default),
        _ => default,
    }
}

/// Truncate a description to `max_chars` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_f64_variants() {
        assert_eq!(coerce_f64(Some(&json!(0.62)), 0.5), 0.62);
        assert_eq!(coerce_f64(Some(&json!("0.35")), 0.5), 0.35);
        assert_eq!(coerce_f64(Some(&json!("not a number")), 0.5), 0.5);
        assert_eq!(coerce_f64(Some(&json!(null)), 0.5), 0.5);
        assert_eq!(coerce_f64(None, 0.5), 0.5);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 200), "short");
        let long = "x".repeat(250);
        assert_eq!(truncate_chars(&long, 200).chars().count(), 200);
        // Multi-byte chars must not split
        let accented = "é".repeat(10);
        assert_eq!(truncate_chars(&accented, 5), "ééééé");
    }
}
