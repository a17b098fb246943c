//! Index reader trait consumed by term vector extraction.

use std::collections::HashSet;

use crate::data::Document;
use crate::error::Result;
use crate::index::term_vector::DocumentTermVectors;

/// Restricts which stored fields a lookup loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    /// Load every stored field.
    All,
    /// Load only the named fields.
    Only(HashSet<String>),
}

impl FieldSelector {
    /// Select a single field.
    pub fn single(field: impl Into<String>) -> Self {
        FieldSelector::Only(HashSet::from([field.into()]))
    }

    pub fn accepts(&self, field: &str) -> bool {
        match self {
            FieldSelector::All => true,
            FieldSelector::Only(fields) => fields.contains(field),
        }
    }
}

/// Read-only view over one immutable index snapshot.
///
/// Document ids are only meaningful for the snapshot that produced them.
pub trait IndexReader: Send + Sync + std::fmt::Debug {
    /// Get the maximum document ID in the index, plus one.
    fn max_doc(&self) -> u64;

    /// Get the term vectors of a document.
    ///
    /// Returns `None` when the document has no field with captured term vectors.
    fn term_vectors(&self, doc_id: u64) -> Result<Option<DocumentTermVectors>>;

    /// Get the stored fields of a document, restricted to `selector`.
    fn stored_fields(&self, doc_id: u64, selector: &FieldSelector) -> Result<Document>;

    /// Get the number of documents containing `term` in `field`.
    ///
    /// Returns `None` if the term is not in the field's dictionary.
    fn doc_freq(&self, field: &str, term: &str) -> Result<Option<u32>>;

    /// Release resources held by this reader.
    ///
    /// Called once, when the last handle to the snapshot is dropped.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}
