//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use axum::{
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::cache::{CacheStats, CacheStatus};
use crate::pipeline::PipelineResponse;

/// Response header carrying the cache status.
pub const CACHE_HEADER: &str = "x-cache";

// == Legal Answer ==
impl PipelineResponse {
    /// Upstream payload with the `cache` indicator added.
    ///
    /// Non-object payloads are wrapped as `{ "data": .., "cache": .. }`. An
    /// upstream object that already has a `cache` field is left untouched;
    /// the indicator is then only in the `X-Cache` header.
    pub fn into_body(self) -> Value {
        match self.payload {
            Value::Object(mut map) => {
                map.entry("cache").or_insert_with(|| json!(self.cache));
                Value::Object(map)
            }
            other => json!({ "data": other, "cache": self.cache }),
        }
    }
}

impl IntoResponse for PipelineResponse {
    fn into_response(self) -> Response {
        let status = self.cache;
        let mut response = Json(self.into_body()).into_response();
        response.headers_mut().insert(
            HeaderName::from_static(CACHE_HEADER),
            HeaderValue::from_static(status.as_str()),
        );
        response
    }
}

/// Response body for `PUT /api/user/profile`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateResponse {
    pub success: bool,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,
}

impl ProfileUpdateResponse {
    pub fn new(user_id: impl Into<String>, preferences: Option<Value>) -> Self {
        Self {
            success: true,
            user_id: user_id.into(),
            preferences,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
