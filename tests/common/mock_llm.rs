//! Mock LLM client for testing
//!
//! Scripts an outcome per model and records every call for verification.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use askai::llm::{LlmClient, LlmError};

/// Mock LLM with per-model scripted outcomes
pub struct MockLlm {
    outcomes: HashMap<String, Result<String, LlmError>>,
    /// Models called, in order
    pub calls: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script a successful answer for a model
    pub fn with_answer(mut self, model: &str, answer: &str) -> Self {
        self.outcomes
            .insert(model.to_string(), Ok(answer.to_string()));
        self
    }

    /// Script a quota-classified failure for a model
    pub fn with_quota_failure(mut self, model: &str) -> Self {
        self.outcomes.insert(
            model.to_string(),
            Err(LlmError::Api {
                status: 429,
                message: "Quota exceeded".to_string(),
            }),
        );
        self
    }

    /// Script a non-quota failure for a model
    pub fn with_failure(mut self, model: &str, status: u16, message: &str) -> Self {
        self.outcomes.insert(
            model.to_string(),
            Err(LlmError::Api {
                status,
                message: message.to_string(),
            }),
        );
        self
    }

    /// Get all models called so far
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn generate(&self, model: &str, _prompt: &str) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(model.to_string());
        self.outcomes
            .get(model)
            .cloned()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
