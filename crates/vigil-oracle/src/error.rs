//! Error types for the Vigil oracle module

use thiserror::Error;

/// Result type alias for oracle operations
pub type Result<T> = std::result::Result<T, OracleError>;

/// Oracle module errors
#[derive(Debug, Error)]
pub enum OracleError {
    /// External API call failed
    #[error("External API call failed: {0}")]
    ApiCallFailed(String),

    /// Invalid response format
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),
}
