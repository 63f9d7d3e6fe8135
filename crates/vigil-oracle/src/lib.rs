//! Vigil scoring oracle integration
//!
//! This crate wraps the external scoring oracle (a local LLM) behind a
//! client trait and a bounded-concurrency analysis front-end:
//! - `LLMClient`: async trait for raw generation calls
//! - `OllamaProvider`: client for a local Ollama instance
//! - `BehaviorAnalyst`: builds the fraud-analysis prompt, bounds in-flight
//!   requests with a semaphore, and degrades every failure to a zero-score
//!   result so a broken oracle can never be mistaken for confirmed fraud

// Re-export core types
pub use analyst::{AnalystConfig, BehaviorAnalyst, FraudResult};
pub use client::{GenerateRequest, GenerateResponse, LLMClient};
pub use error::{OracleError, Result};

// Re-export providers
pub use provider::{LLMProvider, MockProvider, OllamaProvider};

pub mod analyst;
pub mod client;
pub mod error;
pub mod prompt;
pub mod provider;
