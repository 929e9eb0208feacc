//! Legal Gateway - authenticating, caching front for a legal RAG service
//!
//! Every legal endpoint runs one pipeline: bearer check, validation, cache
//! lookup, upstream call on miss, cache write on success.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod profile;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use pipeline::{LegalRequest, Pipeline, PipelineResponse};
pub use tasks::spawn_cleanup_task;
