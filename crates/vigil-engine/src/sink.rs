//! Verdict sink contract

use crate::error::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vigil_core::FraudScore;

/// Durable destination for confirmed verdicts
///
/// Appends are assumed durable and idempotent-enough; duplicate appends
/// under at-least-once redelivery are an accepted limitation, not a
/// violated invariant.
#[async_trait]
pub trait VerdictSink: Send + Sync {
    /// Append a verdict record
    async fn append(&self, score: &FraudScore) -> Result<()>;
}

/// In-memory sink that records appended verdicts for test verification
#[derive(Clone, Default)]
pub struct MemoryVerdictSink {
    appended: Arc<Mutex<Vec<FraudScore>>>,
}

impl MemoryVerdictSink {
    /// Create a new empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all appended verdicts (for testing)
    pub fn appended(&self) -> Vec<FraudScore> {
        self.appended.lock().unwrap().clone()
    }

    /// Get appended count (for testing)
    pub fn count(&self) -> usize {
        self.appended.lock().unwrap().len()
    }
}

#[async_trait]
impl VerdictSink for MemoryVerdictSink {
    async fn append(&self, score: &FraudScore) -> Result<()> {
        self.appended.lock().unwrap().push(score.clone());
        Ok(())
    }
}

/// Sink used when no database is configured; verdicts are only logged
pub struct LoggingVerdictSink;

#[async_trait]
impl VerdictSink for LoggingVerdictSink {
    async fn append(&self, score: &FraudScore) -> Result<()> {
        tracing::warn!(
            "Fraud score for {} not persisted (no database configured): score {} - {}",
            score.user_id,
            score.score,
            score.reason
        );
        Ok(())
    }
}
