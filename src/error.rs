//! Error types for the legal gateway
//!
//! Provides unified error handling using thiserror. `AppError` is the only
//! error that reaches a caller; `CacheError` stays behind the cache gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

// == Field Violation ==
/// A single field-level validation failure surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending field, as spelled in the request
    pub field: String,
    /// Human readable description of the violation
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// == Validation Error ==
/// Request payload failed its endpoint schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed on {} field(s)", .details.len())]
pub struct ValidationError {
    pub details: Vec<FieldViolation>,
}

impl ValidationError {
    /// Creates a validation error carrying a single violation.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            details: vec![FieldViolation::new(field, message)],
        }
    }

    /// Returns true if any violation names the given field.
    pub fn has_field(&self, field: &str) -> bool {
        self.details.iter().any(|v| v.field == field)
    }
}

// == Upstream Error ==
/// The legal-information service answered with a non-success status, or
/// could not be reached at all (`status` is `None` then).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("RAG service error: {}", .status.map(|s| s.to_string()).unwrap_or_else(|| "unreachable".to_string()))]
pub struct UpstreamError {
    pub status: Option<u16>,
    pub message: Option<String>,
}

// == Cache Error ==
/// Failures of a cache backend. Never surfaced to callers.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key exceeds what the backend accepts
    #[error("Key exceeds maximum length of {0} bytes")]
    KeyTooLong(usize),

    /// Serialized payload exceeds what the backend accepts
    #[error("Value exceeds maximum size of {0} bytes")]
    ValueTooLarge(usize),

    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Payload could not be encoded or decoded
    #[error("Payload encoding failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend unavailable or misbehaving
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

// == App Error Enum ==
/// Unified error type returned by every handler.
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Missing or malformed bearer credential
    #[error("Unauthorized")]
    Unauthorized,

    /// Profile calls need an explicit user id
    #[error("User ID missing")]
    MissingUserId,

    /// Upstream call failed; `message` is already stripped in production
    #[error("External service error (status {status:?})")]
    Upstream {
        status: Option<u16>,
        message: Option<String>,
    },

    /// Internal server error; the message is logged, never returned
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MissingUserId => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Upstream { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::Validation(err) => {
                warn!(violations = err.details.len(), "Request rejected by validation");
                json!({
                    "error": "Validation error",
                    "details": err.details,
                })
            }
            AppError::Unauthorized => json!({ "error": "Unauthorized" }),
            AppError::MissingUserId => json!({ "error": "User ID missing" }),
            AppError::Upstream { message, .. } => {
                error!(status = status.as_u16(), "Upstream call failed");
                match message {
                    Some(msg) => json!({ "error": "External service error", "message": msg }),
                    None => json!({ "error": "External service error" }),
                }
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the gateway.
pub type Result<T> = std::result::Result<T, AppError>;
