//! Request and Response models for the gateway API
//!
//! This module defines the DTOs used for serializing/deserializing HTTP
//! request and response bodies, and the per-endpoint validation rules.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    parse_body, CompareStatesInput, CompareStatesRequest, DefinitionInput, DefinitionParams,
    DefinitionRequest, EvidenceInput, EvidenceRequest, Fields, FromFields, ProcedureInput,
    ProcedureParams,
    ProcedureRequest, ProfileUpdateInput, QueryInput, QueryRequest, Validate,
};
pub use responses::{HealthResponse, ProfileUpdateResponse, StatsResponse, CACHE_HEADER};
