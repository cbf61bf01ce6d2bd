use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::traits::BaseCodeCache;

/// In-memory code cache
///
/// Entries expire after their TTL. Backs unit tests and single-process
/// deployments; production uses the Redis implementation.
pub struct MemoryCodeCache {
    entries: Arc<RwLock<HashMap<String, (String, Instant)>>>,
}

impl MemoryCodeCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Drop entries past their deadline (run periodically)
    pub async fn purge_expired(&self) {
        let mut entries = self.entries.write().await;
        let now = Instant::now();

        entries.retain(|_, (_, deadline)| *deadline > now);
    }
}

impl Default for MemoryCodeCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCodeCache for MemoryCodeCache {
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;

        match entries.get(key) {
            Some((value, deadline)) if *deadline > Instant::now() => Ok(Some(value.clone())),
            _ => Ok(None),
        }
    }

    async fn remove_if_equals(&self, key: &str, value: &str) -> Result<bool> {
        // One write guard spans the compare and the delete, so concurrent
        // consumers of the same code see at most one success
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some((stored, deadline)) if *deadline > Instant::now() && stored == value => {
                entries.remove(key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
