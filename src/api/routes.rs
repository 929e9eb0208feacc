//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    http::{
        header::{REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
        HeaderValue,
    },
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    compare_states_handler, definition_handler, definition_lookup_handler, evidence_handler,
    get_profile_handler, health_handler, procedure_handler, query_handler, stats_handler,
    update_profile_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/legal/query` - Ask a legal question
/// - `POST /api/legal/definition` - Look up a term (JSON body)
/// - `GET /api/legal/definition/:term` - Look up a term (path + query string)
/// - `POST /api/legal/compare-states` - Compare a concept across 2-5 states
/// - `GET /api/legal/procedure/:procedure_type` - Procedure guide for a jurisdiction
/// - `POST /api/legal/evidence` - Evidence requirements for a claim
/// - `GET|PUT /api/user/profile` - Read or update user preferences
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// `allowed_origin` restricts CORS; any origin is allowed when it does not
/// parse as a header value. Every response carries baseline security headers.
pub fn create_router(state: AppState, allowed_origin: &str) -> Router {
    let origin = match HeaderValue::from_str(allowed_origin) {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any origin", allowed_origin);
            AllowOrigin::from(Any)
        }
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let legal = Router::new()
        .route("/query", post(query_handler))
        .route("/definition", post(definition_handler))
        .route("/definition/:term", get(definition_lookup_handler))
        .route("/compare-states", post(compare_states_handler))
        .route("/procedure/:procedure_type", get(procedure_handler))
        .route("/evidence", post(evidence_handler));

    let user = Router::new().route(
        "/profile",
        get(get_profile_handler).put(update_profile_handler),
    );

    Router::new()
        .nest("/api/legal", legal)
        .nest("/api/user", user)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
