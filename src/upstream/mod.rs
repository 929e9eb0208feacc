//! Upstream Module
//!
//! Forwarding of validated requests to the legal-information RAG service.
//!
//! A single call per request, no retries. The HTTP implementation bounds
//! each call with the configured timeout.

mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::UpstreamError;

pub use client::HttpLegalService;

/// HTTP method of an upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamMethod {
    Get,
    Post,
}

/// Describes one request to the RAG service, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamCall {
    pub method: UpstreamMethod,
    /// Unencoded path segments, e.g. `["definition", "adverse possession"]`
    pub segments: Vec<String>,
    /// Query string parameters
    pub query: Vec<(String, String)>,
    /// JSON body, POST only
    pub body: Option<Value>,
}

impl UpstreamCall {
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: UpstreamMethod::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(segment: &str, body: Value) -> Self {
        Self {
            method: UpstreamMethod::Post,
            segments: vec![segment.to_string()],
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Adds a query parameter, skipping it when `value` is `None`.
    pub fn with_param(mut self, name: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Path as sent to the service, for logging.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

// == Legal Service ==
/// The external legal-information service.
#[async_trait]
pub trait LegalService: Send + Sync {
    /// Issues `call` on behalf of `user_id` and returns the JSON answer.
    async fn forward(&self, call: &UpstreamCall, user_id: &str) -> Result<Value, UpstreamError>;
}

/// Pulls the service's own error message out of a failure body.
///
/// Looks at `error` first, then FastAPI's `detail`.
pub fn upstream_message(body: &Value) -> Option<String> {
    ["error", "detail"]
        .iter()
        .find_map(|field| body.get(*field).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_call_with_params() {
        let call = UpstreamCall::get(["procedure", "eviction"])
            .with_param("jurisdiction", Some("CA"))
            .with_param("missing", None::<&str>);

        assert_eq!(call.method, UpstreamMethod::Get);
        assert_eq!(call.path(), "/procedure/eviction");
        assert_eq!(call.query, vec![("jurisdiction".to_string(), "CA".to_string())]);
        assert!(call.body.is_none());
    }

    #[test]
    fn test_post_call_carries_body() {
        let call = UpstreamCall::post("evidence", json!({"claimType": "negligence"}));
        assert_eq!(call.method, UpstreamMethod::Post);
        assert_eq!(call.path(), "/evidence");
        assert_eq!(call.body, Some(json!({"claimType": "negligence"})));
    }

    #[test]
    fn test_upstream_message_prefers_error_field() {
        let body = json!({"error": "bad jurisdiction", "detail": "ignored"});
        assert_eq!(upstream_message(&body), Some("bad jurisdiction".to_string()));
    }

    #[test]
    fn test_upstream_message_falls_back_to_detail() {
        let body = json!({"detail": "Unknown procedure type"});
        assert_eq!(upstream_message(&body), Some("Unknown procedure type".to_string()));
        assert_eq!(upstream_message(&json!({"detail": [1, 2]})), None);
    }
}
