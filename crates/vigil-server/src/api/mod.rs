//! HTTP API
//!
//! REST-only surface: health check plus the typed event ingest routes
//! that front the fraud escalation engine.

mod rest;

// Re-export public API
pub use rest::{create_router, AppState, HealthResponse, IngestResponse};
