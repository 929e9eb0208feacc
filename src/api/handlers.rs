//! API Handlers
//!
//! HTTP request handlers. The legal handlers only adapt axum extractors to
//! the shared pipeline; profile handlers talk to the profile store.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::authenticate;
use crate::cache::{CacheBackend, CacheGateway};
use crate::config::Config;
use crate::error::{AppError, Result, ValidationError};
use crate::models::{
    parse_body, CompareStatesInput, DefinitionInput, DefinitionParams, EvidenceInput,
    HealthResponse, ProcedureInput, ProcedureParams, ProfileUpdateInput, ProfileUpdateResponse,
    QueryInput, StatsResponse, Validate,
};
use crate::pipeline::{Pipeline, PipelineResponse};
use crate::profile::{InMemoryProfileStore, ProfileStore, UserProfile};
use crate::upstream::{HttpLegalService, LegalService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub profiles: Arc<dyn ProfileStore>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { pipeline, profiles }
    }

    /// Wires the HTTP upstream client and an in-memory profile store around
    /// the given cache backend.
    pub fn from_config(config: &Config, cache: Arc<dyn CacheBackend>) -> anyhow::Result<Self> {
        let upstream: Arc<dyn LegalService> = Arc::new(HttpLegalService::new(
            &config.rag_service_url,
            Duration::from_secs(config.upstream_timeout),
        )?);
        let pipeline = Pipeline::new(CacheGateway::new(cache), upstream, !config.is_production());
        Ok(Self::new(pipeline, Arc::new(InMemoryProfileStore::new())))
    }
}

/// Handler for POST /api/legal/query
pub async fn query_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<PipelineResponse> {
    state
        .pipeline
        .run(&headers, || parse_body(&body)?.extract::<QueryInput>())
        .await
}

/// Handler for POST /api/legal/definition
pub async fn definition_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<PipelineResponse> {
    state
        .pipeline
        .run(&headers, || parse_body(&body)?.extract::<DefinitionInput>())
        .await
}

/// Handler for GET /api/legal/definition/:term
pub async fn definition_lookup_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    term: std::result::Result<Path<String>, PathRejection>,
    params: std::result::Result<Query<DefinitionParams>, QueryRejection>,
) -> Result<PipelineResponse> {
    state
        .pipeline
        .run(&headers, || {
            let Path(term) = term.map_err(|e| ValidationError::single("term", e.body_text()))?;
            let Query(params) = params.map_err(query_violation)?;
            DefinitionInput::from_path(term, params).validate()
        })
        .await
}

/// Handler for POST /api/legal/compare-states
pub async fn compare_states_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<PipelineResponse> {
    state
        .pipeline
        .run(&headers, || parse_body(&body)?.extract::<CompareStatesInput>())
        .await
}

/// Handler for GET /api/legal/procedure/:procedure_type
pub async fn procedure_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    procedure_type: std::result::Result<Path<String>, PathRejection>,
    params: std::result::Result<Query<ProcedureParams>, QueryRejection>,
) -> Result<PipelineResponse> {
    state
        .pipeline
        .run(&headers, || {
            let Path(procedure_type) = procedure_type
                .map_err(|e| ValidationError::single("procedureType", e.body_text()))?;
            let Query(params) = params.map_err(query_violation)?;
            ProcedureInput::from_path(procedure_type, params).validate()
        })
        .await
}

/// Malformed query strings are reported after authentication, like any
/// other invalid input.
fn query_violation(rejection: QueryRejection) -> ValidationError {
    ValidationError::single("query", rejection.body_text())
}

/// Handler for POST /api/legal/evidence
pub async fn evidence_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<PipelineResponse> {
    state
        .pipeline
        .run(&headers, || parse_body(&body)?.extract::<EvidenceInput>())
        .await
}

/// Handler for GET /api/user/profile
pub async fn get_profile_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>> {
    let identity = authenticate(&headers)?;
    let user_id = identity.user_id().ok_or(AppError::MissingUserId)?;

    let profile = state
        .profiles
        .get(user_id)
        .await?
        .unwrap_or_else(|| UserProfile::empty(user_id));

    Ok(Json(profile))
}

/// Handler for PUT /api/user/profile
///
/// Only writes when the body carries `preferences`.
pub async fn update_profile_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ProfileUpdateResponse>> {
    let identity = authenticate(&headers)?;
    let user_id = identity.user_id().ok_or(AppError::MissingUserId)?;
    let preferences = parse_body(&body)?.extract::<ProfileUpdateInput>()?;

    if let Some(prefs) = &preferences {
        state.profiles.upsert(user_id, prefs.clone()).await?;
    }

    Ok(Json(ProfileUpdateResponse::new(user_id, preferences)))
}

/// Handler for GET /stats
///
/// 204 when the cache backend keeps no statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Response {
    match state.pipeline.cache().stats().await {
        Some(stats) => Json(StatsResponse::from(stats)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
