//! Request DTOs and their validation
//!
//! Each endpoint has a raw input type (what the caller sent, every field
//! optional) and a normalized request produced by `Validate`. Normalized
//! requests know their cache key and the upstream call that answers them.

use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::cache::{key, CacheKey, CacheStatus};
use crate::endpoint::Endpoint;
use crate::error::{FieldViolation, ValidationError};
use crate::pipeline::LegalRequest;
use crate::upstream::UpstreamCall;

// == Bounds ==
pub const MIN_RESULTS: i64 = 1;
pub const MAX_RESULTS: i64 = 20;
pub const DEFAULT_MAX_RESULTS: u32 = 5;
pub const MIN_COMPARED_STATES: usize = 2;
pub const MAX_COMPARED_STATES: usize = 5;

/// Turns raw caller input into a normalized request.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ValidationError>;
}

/// Parses a JSON body into its top-level fields. An empty body parses as
/// an empty object so the caller gets per-field violations instead of a
/// parse error.
pub fn parse_body(body: &Bytes) -> Result<Fields, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Fields::default());
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(Fields::new(map)),
        Ok(_) => Err(ValidationError::single("body", "must be a JSON object")),
        Err(e) => Err(ValidationError::single("body", format!("Invalid JSON: {e}"))),
    }
}

/// Builds a raw input from body fields, recording wrong-typed fields.
pub trait FromFields: Sized {
    fn from_fields(fields: &mut Fields) -> Self;
}

/// Top-level fields of a JSON object body, read with typed accessors.
///
/// A field of the wrong type reads as absent and is reported against its
/// own name. `null` reads as absent.
#[derive(Debug, Default)]
pub struct Fields {
    map: Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl Fields {
    pub fn new(map: Map<String, Value>) -> Self {
        Self {
            map,
            violations: Vec::new(),
        }
    }

    /// Builds `T` and validates it. Type violations come first; a validation
    /// violation on a field already reported for its type is dropped.
    pub fn extract<T>(mut self) -> Result<T::Output, ValidationError>
    where
        T: FromFields + Validate,
    {
        let result = T::from_fields(&mut self).validate();
        if self.violations.is_empty() {
            return result;
        }

        let mut details = self.violations;
        if let Err(err) = result {
            let rest: Vec<FieldViolation> = err
                .details
                .into_iter()
                .filter(|v| !details.iter().any(|t| t.field == v.field))
                .collect();
            details.extend(rest);
        }
        Err(ValidationError { details })
    }

    fn take(&mut self, name: &str, aliases: &[&str]) -> Option<Value> {
        let value = self
            .map
            .remove(name)
            .or_else(|| aliases.iter().find_map(|alias| self.map.remove(*alias)))?;
        (!value.is_null()).then_some(value)
    }

    fn reject(&mut self, name: &str, message: &str) {
        self.violations.push(FieldViolation::new(name, message));
    }

    /// String field, also accepted under any of `aliases`.
    pub fn string(&mut self, name: &str, aliases: &[&str]) -> Option<String> {
        match self.take(name, aliases)? {
            Value::String(s) => Some(s),
            _ => {
                self.reject(name, "must be a string");
                None
            }
        }
    }

    pub fn integer(&mut self, name: &str) -> Option<i64> {
        match self.take(name, &[])? {
            Value::Number(n) if n.is_i64() => n.as_i64(),
            _ => {
                self.reject(name, "must be an integer");
                None
            }
        }
    }

    pub fn boolean(&mut self, name: &str) -> Option<bool> {
        match self.take(name, &[])? {
            Value::Bool(b) => Some(b),
            _ => {
                self.reject(name, "must be a boolean");
                None
            }
        }
    }

    pub fn string_list(&mut self, name: &str) -> Option<Vec<String>> {
        let strings = match self.take(name, &[])? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect::<Option<Vec<String>>>(),
            _ => None,
        };
        if strings.is_none() {
            self.reject(name, "must be an array of strings");
        }
        strings
    }

    /// Any JSON value; shape checks are left to `Validate`.
    pub fn any(&mut self, name: &str) -> Option<Value> {
        self.take(name, &[])
    }
}

// == Field Checks ==
/// Accumulates violations across all fields of one request.
#[derive(Debug, Default)]
struct Checker {
    violations: Vec<FieldViolation>,
}

impl Checker {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    /// Non-empty after trimming.
    fn required_text(&mut self, field: &str, value: Option<String>) -> String {
        let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
        if value.is_empty() {
            self.fail(field, format!("{field} is required"));
        }
        value
    }

    /// Two ASCII letters, upper-cased.
    fn state_code(&mut self, field: &str, value: &str) -> String {
        let code = value.trim().to_ascii_uppercase();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            self.fail(field, "must be a 2-letter jurisdiction code");
        }
        code
    }

    fn optional_jurisdiction(&mut self, field: &str, value: Option<String>) -> Option<String> {
        value.map(|v| self.state_code(field, &v))
    }

    fn required_jurisdiction(&mut self, field: &str, value: Option<String>) -> String {
        match value {
            Some(v) => self.state_code(field, &v),
            None => {
                self.fail(field, format!("{field} is required"));
                String::new()
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                details: self.violations,
            })
        }
    }
}

// == Query ==
/// Body of `POST /api/legal/query`.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    pub question: Option<String>,
    pub jurisdiction: Option<String>,
    pub document_types: Option<Vec<String>>,
    pub max_results: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    /// Sorted and de-duplicated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_types: Option<Vec<String>>,
    pub max_results: u32,
}

impl FromFields for QueryInput {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            question: fields.string("question", &["query"]),
            jurisdiction: fields.string("jurisdiction", &[]),
            document_types: fields.string_list("documentTypes"),
            max_results: fields.integer("maxResults"),
        }
    }
}

impl Validate for QueryInput {
    type Output = QueryRequest;

    fn validate(self) -> Result<QueryRequest, ValidationError> {
        let mut check = Checker::default();
        let question = check.required_text("question", self.question);
        let jurisdiction = check.optional_jurisdiction("jurisdiction", self.jurisdiction);

        let document_types = self.document_types.map(|types| {
            let mut types: Vec<String> = types.iter().map(|t| t.trim().to_string()).collect();
            if types.iter().any(String::is_empty) {
                check.fail("documentTypes", "entries must not be empty");
            }
            types.sort();
            types.dedup();
            types
        });

        let max_results = match self.max_results {
            None => DEFAULT_MAX_RESULTS,
            Some(n) if (MIN_RESULTS..=MAX_RESULTS).contains(&n) => n as u32,
            Some(_) => {
                check.fail(
                    "maxResults",
                    format!("must be between {MIN_RESULTS} and {MAX_RESULTS}"),
                );
                DEFAULT_MAX_RESULTS
            }
        };

        check.finish(QueryRequest {
            question,
            jurisdiction,
            document_types,
            max_results,
        })
    }
}

impl LegalRequest for QueryRequest {
    const ENDPOINT: Endpoint = Endpoint::Query;

    fn cache_key(&self) -> String {
        CacheKey::new(Self::ENDPOINT.name())
            .text(&self.question)
            .optional(self.jurisdiction.as_deref())
            .list(self.document_types.as_deref())
            .value(self.max_results)
            .build()
    }

    fn upstream_call(&self) -> UpstreamCall {
        UpstreamCall::post("query", serde_json::to_value(self).unwrap_or(Value::Null))
    }

    fn audit(&self, user_id: &str, cache: CacheStatus) {
        info!(
            user_id,
            question = %self.question,
            jurisdiction = self.jurisdiction.as_deref().unwrap_or(key::ABSENT),
            %cache,
            "Legal query"
        );
    }
}

// == Definition ==
/// Body of `POST /api/legal/definition`; also assembled from the path and
/// query string of `GET /api/legal/definition/:term`.
#[derive(Debug, Clone, Default)]
pub struct DefinitionInput {
    pub term: Option<String>,
    pub jurisdiction: Option<String>,
    pub plain_language: Option<bool>,
}

/// Query string of `GET /api/legal/definition/:term`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionParams {
    pub jurisdiction: Option<String>,
    pub plain_language: Option<String>,
}

impl DefinitionInput {
    /// Anything but a literal `false` keeps plain language on.
    pub fn from_path(term: String, params: DefinitionParams) -> Self {
        Self {
            term: Some(term),
            jurisdiction: params.jurisdiction,
            plain_language: Some(params.plain_language.as_deref() != Some("false")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionRequest {
    pub term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    pub plain_language: bool,
}

impl FromFields for DefinitionInput {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            term: fields.string("term", &[]),
            jurisdiction: fields.string("jurisdiction", &[]),
            plain_language: fields.boolean("plainLanguage"),
        }
    }
}

impl Validate for DefinitionInput {
    type Output = DefinitionRequest;

    fn validate(self) -> Result<DefinitionRequest, ValidationError> {
        let mut check = Checker::default();
        let term = check.required_text("term", self.term);
        let jurisdiction = check.optional_jurisdiction("jurisdiction", self.jurisdiction);

        check.finish(DefinitionRequest {
            term,
            jurisdiction,
            plain_language: self.plain_language.unwrap_or(true),
        })
    }
}

impl LegalRequest for DefinitionRequest {
    const ENDPOINT: Endpoint = Endpoint::Definition;

    fn cache_key(&self) -> String {
        CacheKey::new(Self::ENDPOINT.name())
            .text(&self.term)
            .optional(self.jurisdiction.as_deref())
            .value(self.plain_language)
            .build()
    }

    fn upstream_call(&self) -> UpstreamCall {
        UpstreamCall::get(["definition", self.term.as_str()])
            .with_param("jurisdiction", self.jurisdiction.as_deref())
            .with_param("plainLanguage", Some(self.plain_language))
    }
}

// == State Comparison ==
/// Body of `POST /api/legal/compare-states`.
#[derive(Debug, Clone, Default)]
pub struct CompareStatesInput {
    pub concept: Option<String>,
    pub states: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareStatesRequest {
    pub concept: String,
    /// Upper-cased and sorted
    pub states: Vec<String>,
}

impl FromFields for CompareStatesInput {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            concept: fields.string("concept", &["topic"]),
            states: fields.string_list("states"),
        }
    }
}

impl Validate for CompareStatesInput {
    type Output = CompareStatesRequest;

    fn validate(self) -> Result<CompareStatesRequest, ValidationError> {
        let mut check = Checker::default();
        let concept = check.required_text("concept", self.concept);

        let raw_states = self.states.unwrap_or_default();
        let mut states: Vec<String> = raw_states
            .iter()
            .map(|s| check.state_code("states", s))
            .collect();
        states.sort();

        if !(MIN_COMPARED_STATES..=MAX_COMPARED_STATES).contains(&states.len()) {
            check.fail(
                "states",
                format!("between {MIN_COMPARED_STATES} and {MAX_COMPARED_STATES} states are required"),
            );
        } else if states.windows(2).any(|pair| pair[0] == pair[1]) {
            check.fail("states", "states must be distinct");
        }

        check.finish(CompareStatesRequest { concept, states })
    }
}

impl LegalRequest for CompareStatesRequest {
    const ENDPOINT: Endpoint = Endpoint::CompareStates;

    fn cache_key(&self) -> String {
        CacheKey::new(Self::ENDPOINT.name())
            .text(&self.concept)
            .list(Some(self.states.as_slice()))
            .build()
    }

    fn upstream_call(&self) -> UpstreamCall {
        UpstreamCall::post("compare-states", serde_json::to_value(self).unwrap_or(Value::Null))
    }
}

// == Procedure ==
/// Path and query string of `GET /api/legal/procedure/:procedure_type`.
#[derive(Debug, Clone, Default)]
pub struct ProcedureInput {
    pub procedure_type: Option<String>,
    pub jurisdiction: Option<String>,
}

/// Query string of `GET /api/legal/procedure/:procedure_type`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcedureParams {
    pub jurisdiction: Option<String>,
}

impl ProcedureInput {
    pub fn from_path(procedure_type: String, params: ProcedureParams) -> Self {
        Self {
            procedure_type: Some(procedure_type),
            jurisdiction: params.jurisdiction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureRequest {
    pub procedure_type: String,
    pub jurisdiction: String,
}

impl Validate for ProcedureInput {
    type Output = ProcedureRequest;

    fn validate(self) -> Result<ProcedureRequest, ValidationError> {
        let mut check = Checker::default();
        let procedure_type = check.required_text("procedureType", self.procedure_type);
        let jurisdiction = check.required_jurisdiction("jurisdiction", self.jurisdiction);

        check.finish(ProcedureRequest {
            procedure_type,
            jurisdiction,
        })
    }
}

impl LegalRequest for ProcedureRequest {
    const ENDPOINT: Endpoint = Endpoint::Procedure;

    fn cache_key(&self) -> String {
        CacheKey::new(Self::ENDPOINT.name())
            .text(&self.procedure_type)
            .text(&self.jurisdiction)
            .build()
    }

    fn upstream_call(&self) -> UpstreamCall {
        UpstreamCall::get(["procedure", self.procedure_type.as_str()])
            .with_param("jurisdiction", Some(&self.jurisdiction))
    }
}

// == Evidence ==
/// Body of `POST /api/legal/evidence`.
#[derive(Debug, Clone, Default)]
pub struct EvidenceInput {
    pub claim_type: Option<String>,
    pub jurisdiction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRequest {
    pub claim_type: String,
    pub jurisdiction: String,
}

impl FromFields for EvidenceInput {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            claim_type: fields.string("claimType", &[]),
            jurisdiction: fields.string("jurisdiction", &[]),
        }
    }
}

impl Validate for EvidenceInput {
    type Output = EvidenceRequest;

    fn validate(self) -> Result<EvidenceRequest, ValidationError> {
        let mut check = Checker::default();
        let claim_type = check.required_text("claimType", self.claim_type);
        let jurisdiction = check.required_jurisdiction("jurisdiction", self.jurisdiction);

        check.finish(EvidenceRequest {
            claim_type,
            jurisdiction,
        })
    }
}

impl LegalRequest for EvidenceRequest {
    const ENDPOINT: Endpoint = Endpoint::Evidence;

    fn cache_key(&self) -> String {
        CacheKey::new(Self::ENDPOINT.name())
            .text(&self.claim_type)
            .text(&self.jurisdiction)
            .build()
    }

    fn upstream_call(&self) -> UpstreamCall {
        UpstreamCall::post("evidence", serde_json::to_value(self).unwrap_or(Value::Null))
    }
}

// == Profile ==
/// Body of `PUT /api/user/profile`.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdateInput {
    pub preferences: Option<Value>,
}

impl FromFields for ProfileUpdateInput {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            preferences: fields.any("preferences"),
        }
    }
}

impl Validate for ProfileUpdateInput {
    /// `None` means "nothing to store".
    type Output = Option<Value>;

    fn validate(self) -> Result<Option<Value>, ValidationError> {
        let mut check = Checker::default();
        if let Some(prefs) = &self.preferences {
            if !prefs.is_object() {
                check.fail("preferences", "must be a JSON object");
            }
        }
        check.finish(self.preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamMethod;
    use serde_json::json;

    fn query(json: &str) -> Result<QueryRequest, ValidationError> {
        parse_body(&Bytes::from(json.to_string()))?.extract::<QueryInput>()
    }

    #[test]
    fn test_query_defaults_and_normalization() {
        let req = query(r#"{"question":"  What is community property?  ","jurisdiction":"ca"}"#).unwrap();
        assert_eq!(req.question, "What is community property?");
        assert_eq!(req.jurisdiction.as_deref(), Some("CA"));
        assert_eq!(req.max_results, 5);
        assert!(req.document_types.is_none());
    }

    #[test]
    fn test_query_accepts_query_alias() {
        let req = query(r#"{"query":"What is a lien?"}"#).unwrap();
        assert_eq!(req.question, "What is a lien?");
    }

    #[test]
    fn test_query_rejects_blank_question() {
        let err = query(r#"{"question":"   "}"#).unwrap_err();
        assert!(err.has_field("question"));
    }

    #[test]
    fn test_query_collects_every_violation() {
        let err = query(r#"{"question":"","jurisdiction":"CAL","maxResults":50}"#).unwrap_err();
        assert!(err.has_field("question"));
        assert!(err.has_field("jurisdiction"));
        assert!(err.has_field("maxResults"));
        assert_eq!(err.details.len(), 3);
    }

    #[test]
    fn test_query_document_types_sorted_and_deduplicated() {
        let req = query(r#"{"question":"q","documentTypes":["statute","case_law","statute"]}"#).unwrap();
        assert_eq!(
            req.document_types,
            Some(vec!["case_law".to_string(), "statute".to_string()])
        );
    }

    #[test]
    fn test_malformed_json_is_a_body_violation() {
        let err = query(r#"{"question":"#).unwrap_err();
        assert!(err.has_field("body"));
    }

    #[test]
    fn test_non_object_body_is_a_body_violation() {
        let err = query(r#"["question"]"#).unwrap_err();
        assert_eq!(err.details, vec![FieldViolation::new("body", "must be a JSON object")]);
    }

    #[test]
    fn test_wrong_type_is_reported_against_its_field() {
        let err = query(r#"{"question":"q","jurisdiction":12}"#).unwrap_err();
        assert_eq!(
            err.details,
            vec![FieldViolation::new("jurisdiction", "must be a string")]
        );
    }

    #[test]
    fn test_type_and_rule_violations_are_collected_together() {
        let err = query(r#"{"question":"","documentTypes":"statute","maxResults":2.5}"#).unwrap_err();
        assert!(err.has_field("question"));
        assert!(err.has_field("documentTypes"));
        assert!(err.has_field("maxResults"));
        assert_eq!(err.details.len(), 3);
    }

    #[test]
    fn test_wrong_typed_required_field_reported_once() {
        let err = query(r#"{"question":42}"#).unwrap_err();
        assert_eq!(err.details, vec![FieldViolation::new("question", "must be a string")]);
    }

    #[test]
    fn test_null_reads_as_absent() {
        let req = query(r#"{"question":"q","jurisdiction":null}"#).unwrap();
        assert_eq!(req.jurisdiction, None);
    }

    #[test]
    fn test_wrong_types_on_every_body_endpoint() {
        fn body(json: &'static str) -> Fields {
            parse_body(&Bytes::from_static(json.as_bytes())).unwrap()
        }

        let err = body(r#"{"term":"tort","plainLanguage":"yes"}"#)
            .extract::<DefinitionInput>()
            .unwrap_err();
        assert_eq!(err.details, vec![FieldViolation::new("plainLanguage", "must be a boolean")]);

        let err = body(r#"{"concept":"divorce","states":["CA",7]}"#)
            .extract::<CompareStatesInput>()
            .unwrap_err();
        assert_eq!(
            err.details,
            vec![FieldViolation::new("states", "must be an array of strings")]
        );

        let err = body(r#"{"claimType":["fraud"],"jurisdiction":"NY"}"#)
            .extract::<EvidenceInput>()
            .unwrap_err();
        assert_eq!(err.details, vec![FieldViolation::new("claimType", "must be a string")]);
    }

    #[test]
    fn test_empty_body_reports_missing_fields() {
        let err = query("").unwrap_err();
        assert!(err.has_field("question"));
    }

    #[test]
    fn test_query_upstream_body() {
        let req = query(r#"{"question":"q","jurisdiction":"NY"}"#).unwrap();
        let call = req.upstream_call();
        assert_eq!(call.method, UpstreamMethod::Post);
        assert_eq!(call.path(), "/query");
        assert_eq!(
            call.body,
            Some(json!({"question": "q", "jurisdiction": "NY", "maxResults": 5}))
        );
    }

    #[test]
    fn test_query_key_distinguishes_max_results() {
        let a = query(r#"{"question":"q","maxResults":5}"#).unwrap();
        let b = query(r#"{"question":"q","maxResults":10}"#).unwrap();
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_definition_from_path() {
        let params = DefinitionParams {
            jurisdiction: Some("tx".to_string()),
            plain_language: Some("false".to_string()),
        };
        let req = DefinitionInput::from_path("estoppel".to_string(), params)
            .validate()
            .unwrap();
        assert_eq!(req.jurisdiction.as_deref(), Some("TX"));
        assert!(!req.plain_language);

        let call = req.upstream_call();
        assert_eq!(call.path(), "/definition/estoppel");
        assert_eq!(
            call.query,
            vec![
                ("jurisdiction".to_string(), "TX".to_string()),
                ("plainLanguage".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_definition_post_and_get_share_key() {
        let posted = parse_body(&Bytes::from_static(br#"{"term":"tort"}"#))
            .unwrap()
            .extract::<DefinitionInput>()
            .unwrap();
        let fetched = DefinitionInput::from_path("tort".to_string(), DefinitionParams::default())
            .validate()
            .unwrap();
        assert_eq!(posted.cache_key(), fetched.cache_key());
        assert_eq!(posted.cache_key(), "definition:tort:all:true");
    }

    #[test]
    fn test_compare_states_normalized() {
        let req = CompareStatesInput {
            concept: Some("divorce".to_string()),
            states: Some(vec!["ny".to_string(), "CA".to_string()]),
        }
        .validate()
        .unwrap();
        assert_eq!(req.states, vec!["CA".to_string(), "NY".to_string()]);
        assert_eq!(req.cache_key(), "compare:divorce:[CA,NY]");
    }

    #[test]
    fn test_compare_states_topic_alias() {
        let req = parse_body(&Bytes::from_static(br#"{"topic":"custody","states":["CA","NY"]}"#))
            .unwrap()
            .extract::<CompareStatesInput>()
            .unwrap();
        assert_eq!(req.concept, "custody");
    }

    #[test]
    fn test_compare_states_bounds() {
        let one = CompareStatesInput {
            concept: Some("divorce".to_string()),
            states: Some(vec!["CA".to_string()]),
        };
        assert!(one.validate().unwrap_err().has_field("states"));

        let six = CompareStatesInput {
            concept: Some("divorce".to_string()),
            states: Some(
                ["CA", "NY", "TX", "FL", "WA", "OR"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
        };
        assert!(six.validate().unwrap_err().has_field("states"));
    }

    #[test]
    fn test_compare_states_rejects_duplicates_and_bad_codes() {
        let dup = CompareStatesInput {
            concept: Some("divorce".to_string()),
            states: Some(vec!["CA".to_string(), "ca".to_string()]),
        };
        assert!(dup.validate().unwrap_err().has_field("states"));

        let bad = CompareStatesInput {
            concept: Some("divorce".to_string()),
            states: Some(vec!["CA".to_string(), "New York".to_string()]),
        };
        assert!(bad.validate().unwrap_err().has_field("states"));
    }

    #[test]
    fn test_procedure_requires_jurisdiction() {
        let err = ProcedureInput {
            procedure_type: Some("eviction".to_string()),
            jurisdiction: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.details, vec![FieldViolation::new("jurisdiction", "jurisdiction is required")]);
    }

    #[test]
    fn test_evidence_upstream_body() {
        let req = EvidenceInput {
            claim_type: Some("negligence".to_string()),
            jurisdiction: Some("fl".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(
            req.upstream_call().body,
            Some(json!({"claimType": "negligence", "jurisdiction": "FL"}))
        );
        assert_eq!(req.cache_key(), "evidence:negligence:FL");
    }

    #[test]
    fn test_profile_preferences_must_be_object() {
        let bad = ProfileUpdateInput {
            preferences: Some(json!("dark mode")),
        };
        assert!(bad.validate().unwrap_err().has_field("preferences"));

        let none = ProfileUpdateInput { preferences: None };
        assert_eq!(none.validate().unwrap(), None);
    }
}
