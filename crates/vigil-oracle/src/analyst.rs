//! Concurrency-bounded behavior analysis
//!
//! `BehaviorAnalyst` is the only entry point the escalation engine uses.
//! It never returns an error: connection failures, timeouts and malformed
//! oracle output all degrade to a zero-score, non-critical result so that
//! an unreachable or confused oracle can never produce a fraud verdict.

use crate::client::{GenerateRequest, LLMClient};
use crate::prompt::build_analysis_prompt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error};

/// Verdict returned by the scoring oracle
#[derive(Debug, Clone, PartialEq)]
pub struct FraudResult {
    /// Risk score, conventionally in [0, 1]
    pub score: f64,

    /// Justification string from the oracle
    pub reason: String,

    /// Whether the score reached the critical cutoff
    pub is_critical: bool,
}

impl FraudResult {
    /// Build a result, deriving the critical flag from the cutoff
    pub fn new(score: f64, reason: String, critical_cutoff: f64) -> Self {
        Self {
            score,
            reason,
            is_critical: score >= critical_cutoff,
        }
    }

    /// Zero-score fallback used on any oracle failure
    pub fn degraded(reason: String) -> Self {
        Self {
            score: 0.0,
            reason,
            is_critical: false,
        }
    }
}

/// Configuration for the behavior analyst
#[derive(Debug, Clone)]
pub struct AnalystConfig {
    /// Model identifier passed to the provider
    pub model: String,

    /// Maximum concurrent in-flight oracle requests, process-wide
    pub concurrency_limit: usize,

    /// Scores at or above this value are flagged critical
    pub critical_cutoff: f64,
}

impl AnalystConfig {
    /// Create a configuration for the given model
    pub fn new(model: String) -> Self {
        Self {
            model,
            concurrency_limit: 5,
            critical_cutoff: 1.0,
        }
    }

    /// Set the concurrency limit
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit;
        self
    }

    /// Set the critical cutoff
    pub fn with_critical_cutoff(mut self, cutoff: f64) -> Self {
        self.critical_cutoff = cutoff;
        self
    }
}

/// Bounded-concurrency scoring front-end over an `LLMClient`
pub struct BehaviorAnalyst {
    client: Arc<dyn LLMClient>,
    config: AnalystConfig,
    semaphore: Arc<Semaphore>,
}

impl BehaviorAnalyst {
    /// Create a new analyst over the given client
    pub fn new(client: Arc<dyn LLMClient>, config: AnalystConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.concurrency_limit));
        Self {
            client,
            config,
            semaphore,
        }
    }

    /// Analyze a window of events and return a verdict
    ///
    /// The semaphore permit is held only for the network call; it is
    /// released before response parsing, success or failure.
    pub async fn analyze_behavior(&self, events: &[serde_json::Value]) -> FraudResult {
        let prompt = match build_analysis_prompt(events) {
            Ok(prompt) => prompt,
            Err(e) => {
                error!("Failed to render analysis prompt: {}", e);
                return FraudResult::degraded(format!("Prompt Error: {}", e));
            }
        };

        let request = GenerateRequest::new(prompt, self.config.model.clone())
            .with_format("json".to_string());

        let content = {
            let _permit = match self.semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => return FraudResult::degraded("Analyst shut down".to_string()),
            };
            debug!("Acquired semaphore for oracle inference");

            match self.client.generate(request).await {
                Ok(response) => response.content,
                Err(e) => {
                    error!("Oracle call failed: {}", e);
                    return FraudResult::degraded(format!("Connection Error: {}", e));
                }
            }
        };

        match parse_verdict(&content) {
            Some((score, reason)) => FraudResult::new(score, reason, self.config.critical_cutoff),
            None => {
                error!("Failed to parse oracle response JSON: {}", content);
                FraudResult::degraded("Response Parsing Error".to_string())
            }
        }
    }
}

/// Extract (score, reason) from the oracle's JSON verdict
///
/// Returns None on malformed JSON or a missing/non-numeric score. A
/// missing reason is tolerated with a placeholder.
fn parse_verdict(content: &str) -> Option<(f64, String)> {
    let parsed: serde_json::Value = serde_json::from_str(content).ok()?;
    let score = parsed.get("score")?.as_f64()?;
    let reason = parsed
        .get("reason")
        .and_then(|r| r.as_str())
        .unwrap_or("No reason provided")
        .to_string();

    Some((score, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn analyst_over(provider: MockProvider) -> BehaviorAnalyst {
        BehaviorAnalyst::new(
            Arc::new(provider),
            AnalystConfig::new("mistral:latest".to_string()),
        )
    }

    fn sample_events() -> Vec<serde_json::Value> {
        vec![
            serde_json::json!({"event_type": "login", "user_id": "u1"}),
            serde_json::json!({"event_type": "buy", "user_id": "u1"}),
        ]
    }

    #[tokio::test]
    async fn test_confirmed_verdict_is_parsed() {
        let provider = MockProvider::new();
        provider.push_response(r#"{"score": 0.85, "reason": "Burst of logins"}"#.to_string());
        let analyst = analyst_over(provider);

        let result = analyst.analyze_behavior(&sample_events()).await;

        assert_eq!(result.score, 0.85);
        assert_eq!(result.reason, "Burst of logins");
        assert!(!result.is_critical);
    }

    #[tokio::test]
    async fn test_critical_flag_derived_at_construction() {
        let provider = MockProvider::new();
        provider.push_response(r#"{"score": 1.0, "reason": "Known-bad signature"}"#.to_string());
        let analyst = analyst_over(provider);

        let result = analyst.analyze_behavior(&sample_events()).await;

        assert!(result.is_critical);
    }

    #[tokio::test]
    async fn test_malformed_json_degrades() {
        let provider = MockProvider::new();
        provider.push_response("not json at all".to_string());
        let analyst = analyst_over(provider);

        let result = analyst.analyze_behavior(&sample_events()).await;

        assert_eq!(result.score, 0.0);
        assert_eq!(result.reason, "Response Parsing Error");
        assert!(!result.is_critical);
    }

    #[tokio::test]
    async fn test_missing_score_degrades() {
        let provider = MockProvider::new();
        provider.push_response(r#"{"reason": "no score field"}"#.to_string());
        let analyst = analyst_over(provider);

        let result = analyst.analyze_behavior(&sample_events()).await;

        assert_eq!(result.score, 0.0);
        assert_eq!(result.reason, "Response Parsing Error");
    }

    #[tokio::test]
    async fn test_non_numeric_score_degrades() {
        let provider = MockProvider::new();
        provider.push_response(r#"{"score": "high", "reason": "r"}"#.to_string());
        let analyst = analyst_over(provider);

        let result = analyst.analyze_behavior(&sample_events()).await;

        assert_eq!(result.score, 0.0);
        assert_eq!(result.reason, "Response Parsing Error");
    }

    #[tokio::test]
    async fn test_connection_failure_degrades() {
        let provider = MockProvider::new();
        provider.push_failure("connection refused".to_string());
        let analyst = analyst_over(provider);

        let result = analyst.analyze_behavior(&sample_events()).await;

        assert_eq!(result.score, 0.0);
        assert!(result.reason.starts_with("Connection Error"));
        assert!(result.reason.contains("connection refused"));
        assert!(!result.is_critical);
    }

    #[tokio::test]
    async fn test_missing_reason_gets_placeholder() {
        let provider = MockProvider::new();
        provider.push_response(r#"{"score": 0.7}"#.to_string());
        let analyst = analyst_over(provider);

        let result = analyst.analyze_behavior(&sample_events()).await;

        assert_eq!(result.score, 0.7);
        assert_eq!(result.reason, "No reason provided");
    }

    #[tokio::test]
    async fn test_prompt_embeds_event_batch() {
        let provider = MockProvider::new();
        let analyst = analyst_over(provider.clone());

        analyst.analyze_behavior(&sample_events()).await;

        let recorded = provider.recorded_requests();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].prompt.contains("EVENTS (2 in window)"));
        assert!(recorded[0].prompt.contains("OUTPUT FORMAT (JSON ONLY)"));
        assert_eq!(recorded[0].format.as_deref(), Some("json"));
    }

    /// Provider wrapper that tracks the maximum number of concurrent calls
    struct ConcurrencyProbe {
        inner: MockProvider,
        in_flight: Arc<AtomicUsize>,
        max_seen: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl LLMClient for ConcurrencyProbe {
        async fn generate(
            &self,
            request: GenerateRequest,
        ) -> crate::error::Result<crate::client::GenerateResponse> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_seen.fetch_max(current, Ordering::SeqCst);
            let result = self.inner.generate(request).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        }

        fn name(&self) -> &str {
            "probe"
        }
    }

    #[tokio::test]
    async fn test_semaphore_bounds_in_flight_calls() {
        let max_seen = Arc::new(AtomicUsize::new(0));
        let probe = ConcurrencyProbe {
            inner: MockProvider::new().with_delay(Duration::from_millis(20)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_seen: Arc::clone(&max_seen),
        };

        let analyst = Arc::new(BehaviorAnalyst::new(
            Arc::new(probe),
            AnalystConfig::new("m".to_string()).with_concurrency_limit(2),
        ));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let analyst = Arc::clone(&analyst);
            handles.push(tokio::spawn(async move {
                analyst.analyze_behavior(&[]).await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(max_seen.load(Ordering::SeqCst) <= 2);
    }
}
