//! Gemini API Integration
//!
//! reqwest-based implementation of the `generateContent` endpoint. The API
//! key is supplied externally via the `GEMINI_API_KEY` environment variable.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{LlmClient, LlmError};
use crate::config::Config;

/// Gemini `generateContent` response
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Handles Gemini API calls
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new client from config. Credentials come from the
    /// environment; an empty key is allowed and will surface as an API
    /// error on the first call.
    pub fn new(config: &Config) -> Self {
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            warn!("⚠️ GEMINI_API_KEY is not set; queries will fail");
        }
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn extract_text(response: GenerateResponse) -> Result<String, LlmError> {
        let text: String = response
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&serde_json::json!({
                "contents": [{
                    "parts": [{ "text": prompt }]
                }]
            }))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("❌ Gemini API Error ({}): {}", status, body_text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body_text,
            });
        }

        debug!("🧠 Gemini raw body: {}", body_text);

        let parsed: GenerateResponse = serde_json::from_str(&body_text).map_err(|e| {
            warn!("❌ Failed to deserialize Gemini response: {} - Body: {}", e, body_text);
            LlmError::Network(format!("malformed response: {}", e))
        })?;

        Self::extract_text(parsed)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "4" }, { "text": "2" }] }
            }]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(GeminiClient::extract_text(parsed).unwrap(), "42");
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{ "candidates": [] }"#).unwrap();
        assert!(matches!(
            GeminiClient::extract_text(parsed),
            Err(LlmError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_text_missing_fields() {
        // The API omits fields on safety blocks; treat as empty
        let body = r#"{ "candidates": [{ "content": null }] }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            GeminiClient::extract_text(parsed),
            Err(LlmError::EmptyResponse)
        ));
    }

    #[test]
    fn test_endpoint_shape() {
        let config = Config::default();
        let client = GeminiClient::new(&config);
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
