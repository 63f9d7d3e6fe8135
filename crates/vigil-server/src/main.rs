//! Vigil HTTP Server
//!
//! Ingests behavioral events, archives them to the bronze layer, and runs
//! the fraud escalation engine over each behavioral event.

pub mod api;
pub mod bronze;
pub mod config;
pub mod engine;
pub mod error;

use crate::bronze::BronzeArchive;
use crate::config::ServerConfig;
use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing()?;

    // Load configuration
    let config = ServerConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    // Initialize fraud service
    let service = engine::init_service(&config).await?;
    info!("Fraud service initialized");

    let archive = BronzeArchive::new(config.bronze_path.clone());

    // Create router
    let app = api::create_router(Arc::new(service), Arc::new(archive));

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Event ingest: POST http://{}/v1/events/{{kind}}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "vigil_server=info,vigil_engine=info,vigil_oracle=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
