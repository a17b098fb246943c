//! Request-side types shared by search components.
//!
//! - [`RequestParams`]: ordered, multi-valued request parameters
//! - [`RequestContext`]: per-request state handed to components
//! - [`Stage`], [`ShardDoc`], [`ShardRequest`]: the distributed protocol

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, TermVectorError};
use crate::termvectors::response::TermVectorsResponse;

/// The main query parameter.
pub const QUERY: &str = "q";

/// Generic list of fields to return.
pub const FIELD_LIST: &str = "fl";

/// Ordered, multi-valued request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParams {
    entries: Vec<(String, String)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    /// Append a value, keeping existing values for the same key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Replace all values of `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.remove(&key);
        self.entries.push((key, value.into()));
    }

    /// Remove every value of `key`, returning the removed values.
    pub fn remove(&mut self, key: &str) -> Vec<String> {
        let mut removed = Vec::new();
        self.entries.retain(|(k, v)| {
            if k == key {
                removed.push(v.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values of `key` in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Boolean value of `key`, or `default` when absent.
    ///
    /// Accepts `true`/`on`/`yes` and `false`/`off`/`no`, ignoring case.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => parse_bool(key, value),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => Err(TermVectorError::invalid_argument(format!(
            "invalid boolean value '{value}' for parameter '{key}'"
        ))),
    }
}

/// Stages of a distributed request, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Start,
    ParseQuery,
    ExecuteQuery,
    /// Ranked results are known; fetch per-document data from their shards.
    GetFields,
    Done,
}

/// A ranked result owned by a shard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardDoc {
    /// Document id local to `shard`.
    pub id: u64,
    /// Label of the owning shard.
    pub shard: String,
    /// Rank of this document in the merged result list.
    pub position_in_response: usize,
}

impl ShardDoc {
    pub fn new(id: u64, shard: impl Into<String>, position_in_response: usize) -> Self {
        Self {
            id,
            shard: shard.into(),
            position_in_response,
        }
    }
}

/// Why a sub-request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardPurpose {
    /// Collect top document ids.
    TopIds,
    /// Fetch per-document data for already ranked results.
    GetFields,
}

/// A sub-request targeting one or more shards.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardRequest {
    pub purpose: ShardPurpose,
    pub shards: Vec<String>,
    pub params: RequestParams,
    /// Name of the component that created this request.
    pub requester: String,
}

/// One named section of a response.
///
/// Term vectors stay typed until serialization: their document keys are
/// shard-local and may repeat after a merge, which a JSON object would
/// collapse.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseSection {
    Value(serde_json::Value),
    TermVectors(TermVectorsResponse),
}

impl ResponseSection {
    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseSection::Value(value) => Some(value),
            ResponseSection::TermVectors(_) => None,
        }
    }

    pub fn as_term_vectors(&self) -> Option<&TermVectorsResponse> {
        match self {
            ResponseSection::TermVectors(response) => Some(response),
            ResponseSection::Value(_) => None,
        }
    }
}

impl From<serde_json::Value> for ResponseSection {
    fn from(value: serde_json::Value) -> Self {
        ResponseSection::Value(value)
    }
}

impl From<TermVectorsResponse> for ResponseSection {
    fn from(response: TermVectorsResponse) -> Self {
        ResponseSection::TermVectors(response)
    }
}

impl Serialize for ResponseSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ResponseSection::Value(value) => value.serialize(serializer),
            ResponseSection::TermVectors(response) => response.serialize(serializer),
        }
    }
}

/// Named sections of a response, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    sections: Vec<(String, ResponseSection)>,
}

impl SearchResponse {
    pub fn add(&mut self, name: impl Into<String>, section: impl Into<ResponseSection>) {
        self.sections.push((name.into(), section.into()));
    }

    pub fn get(&self, name: &str) -> Option<&ResponseSection> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, section)| section)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Serialize for SearchResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (name, section) in &self.sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}

/// Per-request state passed through the component pipeline.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub params: RequestParams,
    /// Ranked local document ids from the query stage.
    pub results: Vec<u64>,
    /// Ranked documents with their owning shards (distributed requests).
    pub shard_docs: Vec<ShardDoc>,
    pub stage: Stage,
    pub response: SearchResponse,
    outgoing: Vec<ShardRequest>,
}

impl RequestContext {
    pub fn new(params: RequestParams) -> Self {
        Self {
            params,
            results: Vec::new(),
            shard_docs: Vec::new(),
            stage: Stage::Start,
            response: SearchResponse::default(),
            outgoing: Vec::new(),
        }
    }

    pub fn with_results(mut self, results: Vec<u64>) -> Self {
        self.results = results;
        self
    }

    pub fn with_shard_docs(mut self, shard_docs: Vec<ShardDoc>) -> Self {
        self.shard_docs = shard_docs;
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    /// Queue a sub-request for the orchestrator to dispatch.
    pub fn add_request(&mut self, request: ShardRequest) {
        self.outgoing.push(request);
    }

    pub fn outgoing(&self) -> &[ShardRequest] {
        &self.outgoing
    }

    /// Take the queued sub-requests, leaving the queue empty.
    pub fn take_requests(&mut self) -> Vec<ShardRequest> {
        std::mem::take(&mut self.outgoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_multi_valued() {
        let mut params = RequestParams::new()
            .with("fl", "title")
            .with("q", "rust")
            .with("fl", "body");

        assert_eq!(params.get("fl"), Some("title"));
        assert_eq!(params.get_all("fl"), vec!["title", "body"]);

        assert_eq!(params.remove("q"), vec!["rust".to_string()]);
        assert!(!params.contains("q"));

        params.set("fl", "id");
        assert_eq!(params.get_all("fl"), vec!["id"]);
    }

    #[test]
    fn test_get_bool() {
        let params: RequestParams = [("a", "true"), ("b", "Off"), ("c", "yes"), ("d", "maybe")]
            .into_iter()
            .collect();

        assert!(params.get_bool("a", false).unwrap());
        assert!(!params.get_bool("b", true).unwrap());
        assert!(params.get_bool("c", false).unwrap());
        assert!(params.get_bool("missing", true).unwrap());

        let err = params.get_bool("d", false).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_stage_order() {
        assert!(Stage::ExecuteQuery < Stage::GetFields);
        assert!(Stage::GetFields < Stage::Done);
    }

    #[test]
    fn test_response_keeps_section_order() {
        let mut response = SearchResponse::default();
        response.add("zeta", serde_json::json!(1));
        response.add("alpha", serde_json::json!(2));

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2}"#);
        assert_eq!(
            response.get("alpha").and_then(ResponseSection::as_value),
            Some(&serde_json::json!(2))
        );
    }

    #[test]
    fn test_term_vector_section_keeps_repeated_keys() {
        use crate::termvectors::response::DocumentVector;

        let mut merged = TermVectorsResponse::new("id");
        for key in ["a-0", "b-0"] {
            merged.push(DocumentVector {
                doc_id: 0,
                unique_key: key.to_string(),
                fields: vec![],
            });
        }

        let mut response = SearchResponse::default();
        response.add("termVectors", merged);
        assert_eq!(
            response
                .get("termVectors")
                .and_then(ResponseSection::as_term_vectors)
                .map(TermVectorsResponse::len),
            Some(2)
        );

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"termVectors":{"doc-0":{"uniqueKey":"a-0"},"doc-0":{"uniqueKey":"b-0"},"uniqueKeyFieldName":"id"}}"#
        );
    }

    #[test]
    fn test_take_requests() {
        let mut ctx = RequestContext::new(RequestParams::new());
        ctx.add_request(ShardRequest {
            purpose: ShardPurpose::GetFields,
            shards: vec!["a".to_string()],
            params: RequestParams::new(),
            requester: "tv".to_string(),
        });
        assert_eq!(ctx.outgoing().len(), 1);
        assert_eq!(ctx.take_requests().len(), 1);
        assert!(ctx.outgoing().is_empty());
    }
}
