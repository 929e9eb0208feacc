//! Cache Gateway Module
//!
//! Best-effort front for a `CacheBackend`. Backend failures never escape:
//! a failed read is a miss and a failed write is only logged.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{CacheBackend, CacheStats};

// == Cache Status ==
/// Whether a response was served from cache or freshly fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Cache Gateway ==
#[derive(Clone)]
pub struct CacheGateway {
    backend: Arc<dyn CacheBackend>,
}

impl CacheGateway {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    // == Get ==
    /// Looks up `key`; any backend failure is reported as absence.
    pub async fn get(&self, key: &str) -> Option<Value> {
        match self.backend.get(key).await {
            Ok(Some(value)) => {
                debug!(key, "Cache hit");
                Some(value)
            }
            Ok(None) => {
                debug!(key, "Cache miss");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    // == Put ==
    /// Stores `value` for `ttl_seconds`. Failures are logged and dropped.
    pub async fn put(&self, key: &str, value: &Value, ttl_seconds: u64) {
        match self.backend.put(key, value, ttl_seconds).await {
            Ok(()) => debug!(key, ttl_seconds, "Cached upstream answer"),
            Err(e) => warn!(key, error = %e, "Cache write failed"),
        }
    }

    pub async fn stats(&self) -> Option<CacheStats> {
        self.backend.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use async_trait::async_trait;
    use serde_json::json;

    struct BrokenBackend;

    #[async_trait]
    impl CacheBackend for BrokenBackend {
        async fn get(&self, _key: &str) -> Result<Option<Value>, CacheError> {
            Err(CacheError::Unavailable("connection reset".to_string()))
        }

        async fn put(&self, _key: &str, _value: &Value, _ttl: u64) -> Result<(), CacheError> {
            Err(CacheError::Unavailable("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn test_read_failure_is_a_miss() {
        let gateway = CacheGateway::new(Arc::new(BrokenBackend));
        assert_eq!(gateway.get("query:anything").await, None);
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let gateway = CacheGateway::new(Arc::new(BrokenBackend));
        gateway.put("query:anything", &json!({"ok": true}), 3600).await;
        assert!(gateway.stats().await.is_none());
    }

    #[test]
    fn test_cache_status_serializes_uppercase() {
        assert_eq!(serde_json::to_value(CacheStatus::Hit).unwrap(), json!("HIT"));
        assert_eq!(CacheStatus::Miss.to_string(), "MISS");
    }
}
