//! AskAI Error Types
//!
//! Centralized error handling for the overlay assistant.

use thiserror::Error;

/// Central error type for AskAI
#[derive(Error, Debug)]
pub enum AskError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Input synthesis error: {0}")]
    Input(String),

    #[error("Hotkey error: {0}")]
    Hotkey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for AskAI operations
pub type AskResult<T> = Result<T, AskError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for AskError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        AskError::Lock(err.to_string())
    }
}
