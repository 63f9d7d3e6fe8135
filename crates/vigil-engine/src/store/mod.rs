//! Shared window store contract
//!
//! One sorted collection per user holds (serialized event, unix timestamp)
//! entries; a companion lease key marks users whose current burst has
//! already been escalated. Correctness for concurrent events of the same
//! user rests on `record` executing its four steps as one atomic batch.

use crate::error::Result;
use async_trait::async_trait;

mod memory;
mod redis;

pub use self::redis::RedisWindowStore;
pub use memory::MemoryWindowStore;

/// Extra seconds added to the window key TTL so idle users' windows
/// self-clean after the last countable entry has aged out
pub const WINDOW_TTL_GRACE_SECONDS: u64 = 60;

/// Sorted-window key for a user
pub fn window_key(user_id: &str) -> String {
    format!("user_events:{}", user_id)
}

/// Alert lease key for a user
pub fn lease_key(user_id: &str) -> String {
    format!("last_alert:{}", user_id)
}

/// Per-user sliding window and alert lease store
#[async_trait]
pub trait WindowStore: Send + Sync {
    /// Add an entry scored at `now`, prune entries scored below
    /// `now - window_seconds`, refresh the key expiry to
    /// `window_seconds + WINDOW_TTL_GRACE_SECONDS`, and return the live
    /// count. All four steps execute as one atomic batch; the returned
    /// count is the only one the threshold decision may trust.
    async fn record(
        &self,
        user_id: &str,
        member: String,
        now: f64,
        window_seconds: u64,
    ) -> Result<u64>;

    /// All live members of the user's window, in score order
    async fn window_members(&self, user_id: &str) -> Result<Vec<String>>;

    /// Whether an alert lease is currently active for the user
    async fn lease_active(&self, user_id: &str) -> Result<bool>;

    /// Set the alert lease with the given TTL
    async fn set_lease(&self, user_id: &str, ttl_seconds: u64) -> Result<()>;
}
