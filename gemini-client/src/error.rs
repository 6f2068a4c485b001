//! Gemini client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeminiError {
    /// Missing or implausible configuration (API key, base URL)
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure (DNS, TLS, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be interpreted
    #[error("parse error: {0}")]
    Parse(String),

    /// The API answered successfully but returned no candidate text
    #[error("Gemini returned an empty response")]
    Empty,
}

pub type Result<T> = std::result::Result<T, GeminiError>;
