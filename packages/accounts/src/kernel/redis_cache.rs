use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};
use std::time::Duration;

use super::traits::BaseCodeCache;

// Compare-and-delete as one server-side script: racing consumers of the
// same code see at most one success
const REMOVE_IF_EQUALS_SCRIPT: &str =
    "if redis.call('get', KEYS[1]) == ARGV[1] then return redis.call('del', KEYS[1]) else return 0 end";

/// Redis-backed code cache
///
/// Expiry and the conditional delete are pushed into Redis itself, which
/// keeps the cache correct across processes and replicas.
pub struct RedisCodeCache {
    manager: ConnectionManager,
    remove_if_equals: Script,
}

impl RedisCodeCache {
    /// Connect and hold a reconnecting connection manager
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("invalid Redis URL")?;
        let manager = ConnectionManager::new(client)
            .await
            .context("failed to connect to Redis")?;

        Ok(Self {
            manager,
            remove_if_equals: Script::new(REMOVE_IF_EQUALS_SCRIPT),
        })
    }
}

#[async_trait]
impl BaseCodeCache for RedisCodeCache {
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.manager.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs())
            .await
            .context("redis SET EX failed")?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await.context("redis GET failed")?;

        Ok(value)
    }

    async fn remove_if_equals(&self, key: &str, value: &str) -> Result<bool> {
        let mut conn = self.manager.clone();
        let removed: i32 = self
            .remove_if_equals
            .key(key)
            .arg(value)
            .invoke_async(&mut conn)
            .await
            .context("redis compare-and-delete failed")?;

        Ok(removed == 1)
    }
}
