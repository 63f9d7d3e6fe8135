//! LLM provider implementations

use crate::client::LLMClient;

/// LLM provider trait
pub trait LLMProvider: LLMClient {
    /// Get the provider name
    fn provider_name(&self) -> &str;
}

// Re-export all providers
mod mock;
mod ollama;

pub use mock::MockProvider;
pub use ollama::OllamaProvider;
