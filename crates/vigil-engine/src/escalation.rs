//! Escalation engine
//!
//! `FraudService` consumes one event at a time: it updates the user's
//! sliding window, decides whether the burst crosses the threshold, guards
//! against duplicate escalations with the alert lease, and on a confirmed
//! oracle verdict hands the fraud score to the sink. Every failure path
//! logs and returns; the transport consumer is never stalled by this
//! component.

use crate::error::Result;
use crate::sink::VerdictSink;
use crate::store::WindowStore;
use crate::time::unix_now;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use vigil_core::FraudScore;
use vigil_oracle::{BehaviorAnalyst, FraudResult};

/// Tunable parameters for the escalation engine
#[derive(Debug, Clone)]
pub struct FraudConfig {
    /// Rolling window span over which events are counted
    pub window_seconds: u64,

    /// Minimum live event count that triggers oracle evaluation
    pub threshold_count: u64,

    /// Oracle scores at or above this value confirm the escalation
    pub confirm_threshold: f64,
}

impl FraudConfig {
    /// Create the default configuration (120 s window, 10 events, 0.6 cutoff)
    pub fn new() -> Self {
        Self {
            window_seconds: 120,
            threshold_count: 10,
            confirm_threshold: 0.6,
        }
    }

    /// Set the window span
    pub fn with_window_seconds(mut self, window_seconds: u64) -> Self {
        self.window_seconds = window_seconds;
        self
    }

    /// Set the trigger threshold
    pub fn with_threshold_count(mut self, threshold_count: u64) -> Self {
        self.threshold_count = threshold_count;
        self
    }

    /// Set the confirmation cutoff
    pub fn with_confirm_threshold(mut self, confirm_threshold: f64) -> Self {
        self.confirm_threshold = confirm_threshold;
        self
    }
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Orchestrates the hot path (window store) and intelligence (oracle)
pub struct FraudService {
    store: Arc<dyn WindowStore>,
    analyst: BehaviorAnalyst,
    sink: Arc<dyn VerdictSink>,
    config: FraudConfig,
}

impl FraudService {
    /// Create a new service with default configuration
    pub fn new(
        store: Arc<dyn WindowStore>,
        analyst: BehaviorAnalyst,
        sink: Arc<dyn VerdictSink>,
    ) -> Self {
        Self {
            store,
            analyst,
            sink,
            config: FraudConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: FraudConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the active configuration
    pub fn config(&self) -> &FraudConfig {
        &self.config
    }

    /// Process one inbound event for a user
    ///
    /// Fails softly: store, oracle and sink errors are logged and the call
    /// returns. Redelivery, if any, is the transport's policy.
    pub async fn process_event(&self, user_id: &str, event: &serde_json::Value) {
        let member = match serde_json::to_string(event) {
            Ok(member) => member,
            Err(e) => {
                error!("Failed to serialize event for window tracking: {}", e);
                return;
            }
        };

        let now = unix_now();

        // Atomic: add entry, prune window, count, refresh TTL
        let current_count = match self
            .store
            .record(user_id, member, now, self.config.window_seconds)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                error!("Window store update failed: {}", e);
                return;
            }
        };

        if current_count < self.config.threshold_count {
            return;
        }

        // Check if we recently alerted
        match self.store.lease_active(user_id).await {
            Ok(true) => {
                info!(
                    "Skipping oracle: alert already sent for {} in recent window",
                    user_id
                );
                return;
            }
            Ok(false) => {}
            Err(e) => {
                error!("Alert lease check failed for {}: {}", user_id, e);
                return;
            }
        }

        let events = match self.window_events(user_id).await {
            Ok(events) => events,
            Err(e) => {
                error!("Failed to read window for {}: {}", user_id, e);
                return;
            }
        };

        warn!(
            "Threshold breached ({}) for {}, triggering oracle analysis",
            current_count, user_id
        );

        let result = self.analyst.analyze_behavior(&events).await;

        if result.score >= self.config.confirm_threshold {
            self.handle_fraud_detection(user_id, &result).await;

            // Lease only on confirmation: a benign burst stays eligible for
            // re-evaluation on the next qualifying event
            if let Err(e) = self
                .store
                .set_lease(user_id, self.config.window_seconds)
                .await
            {
                error!("Failed to set alert lease for {}: {}", user_id, e);
            }
        }
    }

    /// Materialize the user's live window as deserialized events
    async fn window_events(&self, user_id: &str) -> Result<Vec<serde_json::Value>> {
        let members = self.store.window_members(user_id).await?;

        Ok(members
            .iter()
            .filter_map(|member| serde_json::from_str(member).ok())
            .collect())
    }

    /// Build and persist the verdict for a confirmed detection
    async fn handle_fraud_detection(&self, user_id: &str, result: &FraudResult) {
        let severity = if result.is_critical {
            "CRITICAL"
        } else {
            "SUSPICIOUS"
        };
        warn!(
            "[{}] Fraud detected for {}: score {} - {}",
            severity, user_id, result.score, result.reason
        );

        let fraud_score = FraudScore::new(
            user_id.to_string(),
            Utc::now(),
            result.score,
            result.reason.clone(),
        );

        if let Err(e) = self.sink.append(&fraud_score).await {
            error!("Failed to persist fraud score for {}: {}", user_id, e);
        }
    }
}
