//! Endpoint catalogue
//!
//! Names and cache lifetimes of the legal endpoints the gateway proxies.

use std::fmt;

/// Volatile query answers may reflect time-sensitive legal status.
pub const QUERY_TTL: u64 = 3_600;
/// Cross-state comparisons.
pub const COMPARISON_TTL: u64 = 43_200;
/// Definitions and other reference material change least often.
pub const REFERENCE_TTL: u64 = 86_400;

/// A legal endpoint served through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Query,
    Definition,
    CompareStates,
    Procedure,
    Evidence,
}

impl Endpoint {
    /// Stable name, used as the cache key prefix and in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Query => "query",
            Endpoint::Definition => "definition",
            Endpoint::CompareStates => "compare",
            Endpoint::Procedure => "procedure",
            Endpoint::Evidence => "evidence",
        }
    }

    /// Cache lifetime of a successful answer, in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        match self {
            Endpoint::Query => QUERY_TTL,
            Endpoint::CompareStates => COMPARISON_TTL,
            Endpoint::Definition | Endpoint::Procedure | Endpoint::Evidence => REFERENCE_TTL,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
