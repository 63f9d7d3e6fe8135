//! In-memory window store for testing

use super::WindowStore;
use crate::error::Result;
use crate::time::unix_now;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct MemoryState {
    /// (member, score) entries per window key, kept in score order
    windows: HashMap<String, Vec<(String, f64)>>,
    /// Lease expiry unix time per user
    leases: HashMap<String, f64>,
}

/// In-process window store
///
/// Mirrors the ZSET semantics the Redis store relies on: member upsert,
/// score-range pruning, ordered reads, expiring leases. Key TTLs are not
/// modeled; entries only leave a window through pruning. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryWindowStore {
    inner: Arc<RwLock<MemoryState>>,
}

impl MemoryWindowStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Live entry count for a user (for test assertions)
    pub fn window_len(&self, user_id: &str) -> usize {
        let state = self.inner.read().unwrap();
        state
            .windows
            .get(&super::window_key(user_id))
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// Whether a lease is present and unexpired (for test assertions)
    pub fn has_lease(&self, user_id: &str) -> bool {
        let state = self.inner.read().unwrap();
        state
            .leases
            .get(&super::lease_key(user_id))
            .map(|expiry| *expiry > unix_now())
            .unwrap_or(false)
    }
}

#[async_trait]
impl WindowStore for MemoryWindowStore {
    async fn record(
        &self,
        user_id: &str,
        member: String,
        now: f64,
        window_seconds: u64,
    ) -> Result<u64> {
        let key = super::window_key(user_id);
        let cutoff = now - window_seconds as f64;

        let mut state = self.inner.write().unwrap();
        let entries = state.windows.entry(key).or_default();

        // ZADD upsert: re-adding a member only updates its score
        entries.retain(|(existing, _)| *existing != member);
        entries.push((member, now));
        entries.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        // ZREMRANGEBYSCORE -inf .. cutoff
        entries.retain(|(_, score)| *score >= cutoff);

        Ok(entries.len() as u64)
    }

    async fn window_members(&self, user_id: &str) -> Result<Vec<String>> {
        let key = super::window_key(user_id);
        let state = self.inner.read().unwrap();

        Ok(state
            .windows
            .get(&key)
            .map(|entries| entries.iter().map(|(member, _)| member.clone()).collect())
            .unwrap_or_default())
    }

    async fn lease_active(&self, user_id: &str) -> Result<bool> {
        Ok(self.has_lease(user_id))
    }

    async fn set_lease(&self, user_id: &str, ttl_seconds: u64) -> Result<()> {
        let key = super::lease_key(user_id);
        let mut state = self.inner.write().unwrap();
        state.leases.insert(key, unix_now() + ttl_seconds as f64);
        Ok(())
    }
}
