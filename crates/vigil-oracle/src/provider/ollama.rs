//! Ollama provider implementation

use crate::client::{GenerateRequest, GenerateResponse, LLMClient};
use crate::error::{OracleError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

/// Default request timeout; a stalled oracle must not hold an admission
/// slot indefinitely
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Ollama provider (local inference via the /api/generate endpoint)
pub struct OllamaProvider {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            client: Client::new(),
        }
    }

    /// Create with a custom request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LLMClient for OllamaProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        // Build request body
        let mut body = json!({
            "model": request.model,
            "prompt": request.prompt,
            "stream": request.stream,
        });

        if let Some(format) = &request.format {
            body["format"] = json!(format);
        }

        // Make API call
        let resp = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::ApiCallFailed(format!("Ollama API call failed: {}", e)))?;

        let status = resp.status();
        let resp_text = resp
            .text()
            .await
            .map_err(|e| OracleError::ApiCallFailed(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(OracleError::ApiCallFailed(format!(
                "Ollama API error ({}): {}",
                status, resp_text
            )));
        }

        // Parse response envelope
        let resp_json: serde_json::Value = serde_json::from_str(&resp_text).map_err(|e| {
            OracleError::InvalidResponse(format!("Failed to parse response body: {}", e))
        })?;

        let content = resp_json["response"]
            .as_str()
            .ok_or_else(|| OracleError::InvalidResponse("No response field in body".to_string()))?;

        Ok(GenerateResponse::new(content.to_string(), request.model))
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

impl LLMProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "Ollama"
    }
}
