//! Vigil escalation engine
//!
//! The core of the service: a per-user sliding-window event counter held in
//! a shared store, a threshold trigger, a deduplication lease, and verdict
//! persistence. Collaborators (window store, oracle client, verdict sink)
//! are injected at construction so the engine carries no hidden singletons.

pub mod error;
pub mod escalation;
pub mod sink;
pub mod store;
mod time;

#[cfg(feature = "sqlx")]
pub mod persistence;

// Re-export main types
pub use error::{EngineError, Result};
pub use escalation::{FraudConfig, FraudService};
pub use sink::{LoggingVerdictSink, MemoryVerdictSink, VerdictSink};
pub use store::{MemoryWindowStore, RedisWindowStore, WindowStore};

#[cfg(feature = "sqlx")]
pub use persistence::FraudScoreWriter;
