//! LLM client abstraction
//!
//! A single `generate(model, prompt) -> text` call that may fail. Errors
//! carry enough information to distinguish quota/rate exhaustion (which is
//! recoverable by switching models) from everything else (which is not).

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the external model call
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Network(String),

    #[error("empty response from model")]
    EmptyResponse,
}

/// Markers that identify a provider-side usage-limit failure
const QUOTA_MARKERS: [&str; 5] = ["quota", "rate", "limit", "429", "resource"];

impl LlmError {
    /// Whether this failure is attributable to provider-side usage limits.
    ///
    /// Classification is by status code and message inspection; only these
    /// failures are worth retrying on another model.
    pub fn is_quota_exhausted(&self) -> bool {
        if let LlmError::Api { status: 429, .. } = self {
            return true;
        }
        let text = self.to_string().to_lowercase();
        QUOTA_MARKERS.iter().any(|m| text.contains(m))
    }
}

/// Trait for LLM backends
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for `prompt` using `model`
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError>;

    fn name(&self) -> &str;
}
