//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the legal-information RAG service
    pub rag_service_url: String,
    /// Upper bound in seconds on a single upstream call
    pub upstream_timeout: u64,
    /// Maximum number of entries the in-memory cache can hold
    pub max_cache_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Deployment environment name ("production" hides error messages)
    pub environment: String,
    /// Origin allowed by CORS
    pub frontend_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 8000)
    /// - `RAG_SERVICE_URL` - RAG service base URL (default: http://localhost:8001)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream call timeout (default: 30)
    /// - `MAX_CACHE_ENTRIES` - Maximum cache entries (default: 10000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `APP_ENV` - Environment name (default: development)
    /// - `FRONTEND_URL` - CORS origin (default: http://localhost:3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            rag_service_url: env::var("RAG_SERVICE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.rag_service_url),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT_SECS").unwrap_or(defaults.upstream_timeout),
            max_cache_entries: parse_var("MAX_CACHE_ENTRIES").unwrap_or(defaults.max_cache_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
        }
    }

    /// Returns true when running in production.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            rag_service_url: "http://localhost:8001".to_string(),
            upstream_timeout: 30,
            max_cache_entries: 10_000,
            cleanup_interval: 60,
            environment: "development".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
        }
    }
}
