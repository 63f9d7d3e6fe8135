//! Shared data model for the Vigil fraud escalation service
//!
//! Typed transport events, the persisted fraud verdict record, and the
//! core error type. This crate performs no I/O.

pub mod error;
pub mod event;
pub mod verdict;

// Re-export main types
pub use error::{CoreError, Result};
pub use event::{Article, Buy, EventKind, Login, Order, Scroll, User};
pub use verdict::FraudScore;
