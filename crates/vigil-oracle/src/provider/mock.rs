//! Mock LLM provider for testing

use crate::client::{GenerateRequest, GenerateResponse, LLMClient};
use crate::error::{OracleError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted outcome for one mock call
#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Respond(String),
    Fail(String),
}

/// Mock LLM provider
///
/// Returns scripted responses in order and records every request for
/// verification in tests. Clones share the same script and recording.
#[derive(Clone)]
pub struct MockProvider {
    name: String,
    default_response: String,
    script: Arc<Mutex<VecDeque<ScriptedOutcome>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            default_response: r#"{"score": 0.0, "reason": "Mock verdict"}"#.to_string(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Create with a custom default response
    pub fn with_response(response: String) -> Self {
        let mut provider = Self::new();
        provider.default_response = response;
        provider
    }

    /// Simulate call latency
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a scripted response for the next call
    pub fn push_response(&self, response: String) {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedOutcome::Respond(response));
    }

    /// Queue a scripted failure for the next call
    pub fn push_failure(&self, message: String) {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedOutcome::Fail(message));
    }

    /// Get all recorded requests (for testing)
    pub fn recorded_requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get call count (for testing)
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let outcome = self.script.lock().unwrap().pop_front();
        match outcome {
            Some(ScriptedOutcome::Respond(content)) => {
                Ok(GenerateResponse::new(content, request.model))
            }
            Some(ScriptedOutcome::Fail(message)) => Err(OracleError::ApiCallFailed(message)),
            None => Ok(GenerateResponse::new(
                self.default_response.clone(),
                request.model,
            )),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl LLMProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "Mock"
    }
}
