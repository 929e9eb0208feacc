//! Shared fakes for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, Router};
use legal_gateway::cache::{CacheBackend, CacheGateway, CacheStats, InMemoryCache};
use legal_gateway::error::{CacheError, UpstreamError};
use legal_gateway::profile::InMemoryProfileStore;
use legal_gateway::upstream::{LegalService, UpstreamCall};
use legal_gateway::{create_router, AppState, Pipeline};
use serde_json::Value;

/// Upstream fake that records every call and replays a fixed answer.
pub struct RecordingService {
    answer: Result<Value, UpstreamError>,
    calls: Mutex<Vec<(UpstreamCall, String)>>,
}

impl RecordingService {
    pub fn answering(answer: Value) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(answer),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, message: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(UpstreamError {
                status: Some(status),
                message: message.map(str::to_string),
            }),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Calls seen so far, with the forwarded user id.
    pub fn calls(&self) -> Vec<(UpstreamCall, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LegalService for RecordingService {
    async fn forward(&self, call: &UpstreamCall, user_id: &str) -> Result<Value, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .push((call.clone(), user_id.to_string()));
        self.answer.clone()
    }
}

/// In-memory cache that counts reads and remembers every write's TTL.
pub struct CountingCache {
    inner: InMemoryCache,
    pub gets: AtomicUsize,
    pub puts: Mutex<Vec<(String, u64)>>,
}

impl CountingCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryCache::new(100),
            gets: AtomicUsize::new(0),
            puts: Mutex::new(Vec::new()),
        })
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<(String, u64)> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheBackend for CountingCache {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &Value, ttl_seconds: u64) -> Result<(), CacheError> {
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), ttl_seconds));
        self.inner.put(key, value, ttl_seconds).await
    }

    async fn stats(&self) -> Option<CacheStats> {
        self.inner.stats().await
    }
}

/// Cache backend that is always down.
pub struct UnavailableCache;

#[async_trait]
impl CacheBackend for UnavailableCache {
    async fn get(&self, _key: &str) -> Result<Option<Value>, CacheError> {
        Err(CacheError::Unavailable("KV namespace unreachable".to_string()))
    }

    async fn put(&self, _key: &str, _value: &Value, _ttl: u64) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("KV namespace unreachable".to_string()))
    }
}

pub fn app(cache: Arc<dyn CacheBackend>, service: Arc<dyn LegalService>, expose_errors: bool) -> Router {
    let pipeline = Pipeline::new(CacheGateway::new(cache), service, expose_errors);
    let state = AppState::new(pipeline, Arc::new(InMemoryProfileStore::new()));
    create_router(state, "http://localhost:3000")
}

pub async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
