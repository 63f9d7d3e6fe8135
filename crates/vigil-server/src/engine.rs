//! Fraud service initialization
//!
//! Converts server configuration into a wired `FraudService`: Redis window
//! store, Ollama-backed behavior analyst, and the verdict sink (Postgres
//! writer when a database is configured, logging sink otherwise).

use crate::config::ServerConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::warn;
use vigil_engine::{
    FraudConfig, FraudService, LoggingVerdictSink, RedisWindowStore, VerdictSink,
};
use vigil_oracle::{AnalystConfig, BehaviorAnalyst, OllamaProvider};

/// Initialize the fraud service
pub async fn init_service(config: &ServerConfig) -> Result<FraudService> {
    let store = RedisWindowStore::connect(&config.redis_url).await?;

    let provider = OllamaProvider::new(config.ollama_url.clone());
    let analyst = BehaviorAnalyst::new(
        Arc::new(provider),
        AnalystConfig::new(config.ollama_model.clone())
            .with_concurrency_limit(config.oracle_concurrency),
    );

    let sink = build_sink(config).await?;

    let fraud_config = FraudConfig::new()
        .with_window_seconds(config.window_seconds)
        .with_threshold_count(config.threshold_count)
        .with_confirm_threshold(config.confirm_threshold);

    Ok(FraudService::new(Arc::new(store), analyst, sink).with_config(fraud_config))
}

/// Build the verdict sink from configuration
async fn build_sink(config: &ServerConfig) -> Result<Arc<dyn VerdictSink>> {
    // Try config first, then fall back to the conventional env variable
    let database_url = config
        .database_url
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok());

    #[cfg(feature = "sqlx")]
    if let Some(db_url) = database_url {
        let pool = sqlx::PgPool::connect(&db_url).await?;
        tracing::info!("Database configured for fraud score persistence");
        return Ok(Arc::new(vigil_engine::FraudScoreWriter::new(pool)));
    }

    #[cfg(not(feature = "sqlx"))]
    let _ = database_url;

    warn!("Database URL not configured, fraud score persistence disabled");
    Ok(Arc::new(LoggingVerdictSink))
}
