//! Request pipeline
//!
//! Every legal endpoint runs the same sequence:
//! auth check → validation → cache read → upstream call → cache write.
//! Endpoints differ only in their request type, which supplies the cache
//! key, the upstream call and (through `Endpoint`) the TTL.

use std::sync::Arc;
use std::time::Instant;

use axum::http::HeaderMap;
use serde_json::Value;
use tracing::{info, warn};

use crate::auth::{authenticate, Identity};
use crate::cache::{CacheGateway, CacheStatus};
use crate::endpoint::Endpoint;
use crate::error::{AppError, Result, UpstreamError, ValidationError};
use crate::upstream::{LegalService, UpstreamCall};

/// A validated request for one of the legal endpoints.
pub trait LegalRequest: Send + Sync {
    const ENDPOINT: Endpoint;

    /// Deterministic key; equal requests always produce equal keys.
    fn cache_key(&self) -> String;

    /// The RAG service call that answers this request.
    fn upstream_call(&self) -> UpstreamCall;

    /// Hook for per-endpoint request logging once an answer was served.
    fn audit(&self, _user_id: &str, _cache: CacheStatus) {}
}

/// Answer produced by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResponse {
    /// Upstream JSON, untouched
    pub payload: Value,
    pub cache: CacheStatus,
}

/// Collaborators shared by every request.
#[derive(Clone)]
pub struct Pipeline {
    cache: CacheGateway,
    upstream: Arc<dyn LegalService>,
    expose_errors: bool,
}

impl Pipeline {
    /// `expose_errors` controls whether upstream messages reach the caller.
    pub fn new(cache: CacheGateway, upstream: Arc<dyn LegalService>, expose_errors: bool) -> Self {
        Self {
            cache,
            upstream,
            expose_errors,
        }
    }

    pub fn cache(&self) -> &CacheGateway {
        &self.cache
    }

    // == Run ==
    /// Authenticates, validates, then serves the request.
    ///
    /// `validate` is only invoked once the credential check passed; nothing
    /// touches the cache or the network before both succeed.
    pub async fn run<R, F>(&self, headers: &HeaderMap, validate: F) -> Result<PipelineResponse>
    where
        R: LegalRequest,
        F: FnOnce() -> std::result::Result<R, ValidationError>,
    {
        let identity = authenticate(headers)?;
        let request = validate()?;
        self.serve(&identity, &request).await
    }

    // == Serve ==
    /// Cache read, upstream call on miss, cache write on success.
    pub async fn serve<R: LegalRequest>(
        &self,
        identity: &Identity,
        request: &R,
    ) -> Result<PipelineResponse> {
        let endpoint = R::ENDPOINT;
        let key = request.cache_key();
        let user_id = identity.forwarded_user_id();

        if let Some(payload) = self.cache.get(&key).await {
            info!(%endpoint, cache = %CacheStatus::Hit, "Served from cache");
            request.audit(user_id, CacheStatus::Hit);
            return Ok(PipelineResponse {
                payload,
                cache: CacheStatus::Hit,
            });
        }

        let call = request.upstream_call();
        let started = Instant::now();
        let payload = self
            .upstream
            .forward(&call, user_id)
            .await
            .map_err(|e| self.upstream_failure(endpoint, &call, e))?;

        info!(
            %endpoint,
            path = %call.path(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            cache = %CacheStatus::Miss,
            "Fetched from RAG service"
        );

        self.cache.put(&key, &payload, endpoint.ttl_seconds()).await;
        request.audit(user_id, CacheStatus::Miss);

        Ok(PipelineResponse {
            payload,
            cache: CacheStatus::Miss,
        })
    }

    fn upstream_failure(&self, endpoint: Endpoint, call: &UpstreamCall, err: UpstreamError) -> AppError {
        warn!(
            %endpoint,
            path = %call.path(),
            status = ?err.status,
            message = ?err.message,
            "RAG service call failed"
        );
        AppError::Upstream {
            status: err.status,
            message: if self.expose_errors { err.message } else { None },
        }
    }
}
