//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "mistral:latest".to_string()
}

fn default_oracle_concurrency() -> usize {
    5
}

fn default_window_seconds() -> u64 {
    120
}

fn default_threshold_count() -> u64 {
    10
}

fn default_confirm_threshold() -> f64 {
    0.6
}

fn default_bronze_path() -> PathBuf {
    PathBuf::from("lakehouse/bronze")
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Redis connection URL for the window store
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Ollama base URL for the scoring oracle
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Model identifier passed to the oracle
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,

    /// Maximum concurrent in-flight oracle requests
    #[serde(default = "default_oracle_concurrency")]
    pub oracle_concurrency: usize,

    /// Sliding window span in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Event count that triggers oracle evaluation
    #[serde(default = "default_threshold_count")]
    pub threshold_count: u64,

    /// Oracle score that confirms an escalation
    #[serde(default = "default_confirm_threshold")]
    pub confirm_threshold: f64,

    /// Root directory for the bronze-layer event archive
    #[serde(default = "default_bronze_path")]
    pub bronze_path: PathBuf,

    /// Database connection URL for fraud score persistence (optional)
    #[serde(default)]
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            redis_url: default_redis_url(),
            ollama_url: default_ollama_url(),
            ollama_model: default_ollama_model(),
            oracle_concurrency: default_oracle_concurrency(),
            window_seconds: default_window_seconds(),
            threshold_count: default_threshold_count(),
            confirm_threshold: default_confirm_threshold(),
            bronze_path: default_bronze_path(),
            database_url: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        // Try to read from config file
        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(config::Environment::with_prefix("VIGIL"))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(_) => {
                // Use default config if no config file found
                tracing::info!("No config file found, using default configuration");
                Ok(Self::default())
            }
        }
    }
}
