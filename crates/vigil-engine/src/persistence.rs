//! Fraud score persistence
//!
//! Asynchronously persists confirmed verdicts to the gold-layer
//! `fraud_scores` table (`user_id, timestamp, score, reason`). Writes are
//! queued over a channel and drained by a background task so the decision
//! path never blocks on the database.

use crate::error::{EngineError, Result};
use crate::sink::VerdictSink;
use async_trait::async_trait;
use tokio::sync::mpsc;
use vigil_core::FraudScore;

/// Async verdict writer backed by Postgres
pub struct FraudScoreWriter {
    /// Channel sender for queuing verdict records
    sender: mpsc::UnboundedSender<FraudScore>,
}

impl FraudScoreWriter {
    /// Create a new writer with a database connection pool
    pub fn new(pool: sqlx::PgPool) -> Self {
        tracing::info!("Creating FraudScoreWriter with database connection pool");

        let (sender, receiver) = mpsc::unbounded_channel();

        // Spawn background task to process verdict records
        tokio::spawn(async move {
            Self::process_records(receiver, pool).await;
        });

        Self { sender }
    }

    /// Drain queued records into the database
    async fn process_records(mut receiver: mpsc::UnboundedReceiver<FraudScore>, pool: sqlx::PgPool) {
        while let Some(record) = receiver.recv().await {
            if let Err(e) = Self::insert_record(&pool, &record).await {
                tracing::error!(
                    "Failed to persist fraud score for {}: {}",
                    record.user_id,
                    e
                );
            }
        }

        tracing::info!("FraudScoreWriter channel closed, background task exiting");
    }

    /// Insert a single verdict record
    async fn insert_record(pool: &sqlx::PgPool, record: &FraudScore) -> Result<()> {
        sqlx::query(
            "INSERT INTO fraud_scores (user_id, timestamp, score, reason) VALUES ($1, $2, $3, $4)",
        )
        .bind(&record.user_id)
        .bind(record.timestamp)
        .bind(record.score)
        .bind(&record.reason)
        .execute(pool)
        .await
        .map_err(|e| EngineError::PersistenceError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl VerdictSink for FraudScoreWriter {
    async fn append(&self, score: &FraudScore) -> Result<()> {
        self.sender
            .send(score.clone())
            .map_err(|e| EngineError::PersistenceError(format!("writer queue closed: {}", e)))
    }
}
