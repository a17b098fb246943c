//! Term vector structures as stored by an index.

use serde::{Deserialize, Serialize};

/// Character span of one term occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermOffset {
    pub start: u32,
    pub end: u32,
}

/// One term of a field's term vector.
///
/// `positions` and `offsets` are empty when the field did not capture them.
#[derive(Debug, Clone, PartialEq)]
pub struct TermVectorEntry {
    pub term: String,
    pub freq: u32,
    pub positions: Vec<u32>,
    pub offsets: Vec<TermOffset>,
}

/// Term vector of a single field of a single document.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTermVector {
    pub field: String,
    /// Whether positions were captured at index time.
    pub has_positions: bool,
    /// Whether offsets were captured at index time.
    pub has_offsets: bool,
    /// Terms in the order the index enumerates them.
    pub terms: Vec<TermVectorEntry>,
}

impl FieldTermVector {
    pub fn new(field: impl Into<String>, has_positions: bool, has_offsets: bool) -> Self {
        Self {
            field: field.into(),
            has_positions,
            has_offsets,
            terms: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// All term vectors of one document, one entry per field that captured them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTermVectors {
    pub fields: Vec<FieldTermVector>,
}

impl DocumentTermVectors {
    pub fn field(&self, name: &str) -> Option<&FieldTermVector> {
        self.fields.iter().find(|f| f.field == name)
    }
}
