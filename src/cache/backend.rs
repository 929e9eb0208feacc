//! Cache Backend Module
//!
//! The key/value contract the gateway relies on, plus the in-memory
//! implementation used by the server binary.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheError;

// == Cache Backend ==
/// Managed key/value store with per-key TTL.
///
/// Implementations may fail freely; the gateway treats every error as a miss
/// on read and ignores it on write.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the parsed JSON stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Stores `value` under `key` for `ttl_seconds`.
    async fn put(&self, key: &str, value: &Value, ttl_seconds: u64) -> Result<(), CacheError>;

    /// Backend statistics, if the backend keeps any.
    async fn stats(&self) -> Option<CacheStats> {
        None
    }
}

// == In-Memory Cache ==
/// `CacheBackend` over a shared `CacheStore`.
#[derive(Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl InMemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Shared handle to the underlying store, for the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }

    /// Remaining TTL of a live key, in seconds.
    pub async fn ttl_of(&self, key: &str) -> Option<u64> {
        self.store.read().await.ttl_of(key)
    }
}

#[async_trait]
impl CacheBackend for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        // Write lock: reads update LRU order and stats
        let payload = self.store.write().await.get(key);
        match payload {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &Value, ttl_seconds: u64) -> Result<(), CacheError> {
        let payload = serde_json::to_string(value)?;
        self.store
            .write()
            .await
            .set(key.to_string(), payload, ttl_seconds)
    }

    async fn stats(&self) -> Option<CacheStats> {
        Some(self.store.read().await.stats())
    }
}
