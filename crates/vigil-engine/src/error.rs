//! Engine error types

use thiserror::Error;

/// Engine error
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window store operation failed
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Redis client error
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Verdict persistence failed
    #[error("Persistence error: {0}")]
    PersistenceError(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
