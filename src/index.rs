//! Read-side access to an index snapshot.
//!
//! - `reader`: the [`IndexReader`](reader::IndexReader) trait consumed by term vector extraction
//! - `term_vector`: per-document, per-field term vector structures
//! - `snapshot`: reference-counted snapshot handles
//! - `memory`: an in-memory reader built from documents and a schema

pub mod memory;
pub mod reader;
pub mod snapshot;
pub mod term_vector;

pub use memory::{MemoryIndex, MemoryIndexBuilder};
pub use reader::{FieldSelector, IndexReader};
pub use snapshot::{SnapshotManager, SnapshotRef};
pub use term_vector::{DocumentTermVectors, FieldTermVector, TermOffset, TermVectorEntry};
