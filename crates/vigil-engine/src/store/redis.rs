//! Redis-backed window store

use super::{lease_key, window_key, WindowStore, WINDOW_TTL_GRACE_SECONDS};
use crate::error::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// Window store over a shared Redis instance
///
/// Window entries live in a ZSET scored by unix timestamp; leases are
/// plain keys with a TTL. The per-event update runs as a single MULTI/EXEC
/// pipeline so concurrent events for the same user cannot lose updates.
pub struct RedisWindowStore {
    conn: ConnectionManager,
}

impl RedisWindowStore {
    /// Connect to Redis and build a store over a managed connection
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        tracing::info!("Connected to Redis window store at {}", redis_url);
        Ok(Self { conn })
    }

    /// Build a store over an existing managed connection
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl WindowStore for RedisWindowStore {
    async fn record(
        &self,
        user_id: &str,
        member: String,
        now: f64,
        window_seconds: u64,
    ) -> Result<u64> {
        let key = window_key(user_id);
        let cutoff = now - window_seconds as f64;
        let ttl = (window_seconds + WINDOW_TTL_GRACE_SECONDS) as i64;
        let mut conn = self.conn.clone();

        let (count,): (u64,) = redis::pipe()
            .atomic()
            .zadd(&key, member, now)
            .ignore()
            .zrembyscore(&key, "-inf", format!("({}", cutoff))
            .ignore()
            .zcard(&key)
            .expire(&key, ttl)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(count)
    }

    async fn window_members(&self, user_id: &str) -> Result<Vec<String>> {
        let key = window_key(user_id);
        let mut conn = self.conn.clone();

        let members: Vec<String> = conn.zrange(&key, 0, -1).await?;
        Ok(members)
    }

    async fn lease_active(&self, user_id: &str) -> Result<bool> {
        let key = lease_key(user_id);
        let mut conn = self.conn.clone();

        let value: Option<String> = conn.get(&key).await?;
        Ok(value.is_some())
    }

    async fn set_lease(&self, user_id: &str, ttl_seconds: u64) -> Result<()> {
        let key = lease_key(user_id);
        let mut conn = self.conn.clone();

        conn.set_ex::<_, _, ()>(&key, "1", ttl_seconds).await?;
        Ok(())
    }
}
