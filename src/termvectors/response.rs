//! Term vector response structures.
//!
//! A response serializes as an ordered map:
//!
//! ```json
//! {
//!   "doc-3": {
//!     "uniqueKey": "a",
//!     "title": {
//!       "rust": { "freq": 2, "offsets": [{"start": 0, "end": 4}], "positions": [0], "idf": 1, "tf-idf": 2.0 }
//!     }
//!   },
//!   "uniqueKeyFieldName": "id"
//! }
//! ```
//!
//! `idf` holds the raw document frequency and `tf-idf` the ratio
//! `freq / df`. The names are kept for wire compatibility; neither value is
//! an inverse or log-scaled score.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::index::term_vector::TermOffset;

pub const UNIQUE_KEY: &str = "uniqueKey";
pub const UNIQUE_KEY_FIELD_NAME: &str = "uniqueKeyFieldName";
pub const DOC_KEY_PREFIX: &str = "doc-";

const FREQ: &str = "freq";
const OFFSETS: &str = "offsets";
const POSITIONS: &str = "positions";
const DOC_FREQ: &str = "idf";
const RATIO: &str = "tf-idf";

/// Statistics of one term. Only requested attributes are present.
#[derive(Debug, Clone, PartialEq)]
pub struct TermStat {
    pub term: String,
    pub freq: Option<u32>,
    pub offsets: Option<Vec<TermOffset>>,
    pub positions: Option<Vec<u32>>,
    /// Number of documents containing the term in this field, at least 1.
    pub doc_freq: Option<u32>,
    /// `freq / doc_freq`.
    pub ratio: Option<f64>,
}

impl TermStat {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            freq: None,
            offsets: None,
            positions: None,
            doc_freq: None,
            ratio: None,
        }
    }

    /// True if no attribute is present.
    pub fn is_bare(&self) -> bool {
        self.freq.is_none()
            && self.offsets.is_none()
            && self.positions.is_none()
            && self.doc_freq.is_none()
            && self.ratio.is_none()
    }
}

impl Serialize for TermStat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(freq) = self.freq {
            map.serialize_entry(FREQ, &freq)?;
        }
        if let Some(offsets) = &self.offsets {
            map.serialize_entry(OFFSETS, offsets)?;
        }
        if let Some(positions) = &self.positions {
            map.serialize_entry(POSITIONS, positions)?;
        }
        if let Some(doc_freq) = self.doc_freq {
            map.serialize_entry(DOC_FREQ, &doc_freq)?;
        }
        if let Some(ratio) = self.ratio {
            map.serialize_entry(RATIO, &ratio)?;
        }
        map.end()
    }
}

/// Term statistics of one field, in index enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldVector {
    pub field: String,
    pub terms: Vec<TermStat>,
}

impl FieldVector {
    pub fn term(&self, term: &str) -> Option<&TermStat> {
        self.terms.iter().find(|t| t.term == term)
    }
}

impl Serialize for FieldVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.terms.len()))?;
        for stat in &self.terms {
            map.serialize_entry(&stat.term, stat)?;
        }
        map.end()
    }
}

/// Term vectors of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentVector {
    pub doc_id: u64,
    pub unique_key: String,
    pub fields: Vec<FieldVector>,
}

impl DocumentVector {
    /// Response key of this document, `doc-<id>`.
    pub fn key(&self) -> String {
        format!("{DOC_KEY_PREFIX}{}", self.doc_id)
    }

    pub fn field(&self, name: &str) -> Option<&FieldVector> {
        self.fields.iter().find(|f| f.field == name)
    }
}

impl Serialize for DocumentVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(UNIQUE_KEY, &self.unique_key)?;
        for field in &self.fields {
            map.serialize_entry(&field.field, field)?;
        }
        map.end()
    }
}

/// Term vectors of a set of documents, in the order they were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct TermVectorsResponse {
    documents: Vec<DocumentVector>,
    unique_key_field_name: String,
}

impl TermVectorsResponse {
    pub fn new(unique_key_field_name: impl Into<String>) -> Self {
        Self {
            documents: Vec::new(),
            unique_key_field_name: unique_key_field_name.into(),
        }
    }

    pub(crate) fn push(&mut self, document: DocumentVector) {
        self.documents.push(document);
    }

    pub(crate) fn append(&mut self, other: TermVectorsResponse) {
        self.documents.extend(other.documents);
    }

    pub fn documents(&self) -> &[DocumentVector] {
        &self.documents
    }

    /// First document with the given id.
    pub fn document(&self, doc_id: u64) -> Option<&DocumentVector> {
        self.documents.iter().find(|d| d.doc_id == doc_id)
    }

    /// Document keys (`doc-<id>`) in response order.
    pub fn keys(&self) -> Vec<String> {
        self.documents.iter().map(DocumentVector::key).collect()
    }

    pub fn unique_key_field_name(&self) -> &str {
        &self.unique_key_field_name
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Serialize for TermVectorsResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.documents.len() + 1))?;
        for document in &self.documents {
            map.serialize_entry(&document.key(), document)?;
        }
        map.serialize_entry(UNIQUE_KEY_FIELD_NAME, &self.unique_key_field_name)?;
        map.end()
    }
}
