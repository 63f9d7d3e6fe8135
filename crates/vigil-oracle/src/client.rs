//! LLM client interface and types

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request to the scoring model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The prompt to send to the model
    pub prompt: String,

    /// Model identifier (e.g., "mistral:latest")
    pub model: String,

    /// Whether to stream the response
    pub stream: bool,

    /// Constrained output format (e.g., "json")
    pub format: Option<String>,
}

impl GenerateRequest {
    /// Create a new generation request
    pub fn new(prompt: String, model: String) -> Self {
        Self {
            prompt,
            model,
            stream: false,
            format: None,
        }
    }

    /// Constrain the output format
    pub fn with_format(mut self, format: String) -> Self {
        self.format = Some(format);
        self
    }
}

/// Response from the scoring model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated text
    pub content: String,

    /// Model that generated the response
    pub model: String,
}

impl GenerateResponse {
    /// Create a new response
    pub fn new(content: String, model: String) -> Self {
        Self { content, model }
    }
}

/// Async LLM client trait
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Call the model with a request
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Get the name of this client
    fn name(&self) -> &str;
}
