//! # Termvectors
//!
//! Term vector statistics for search results.
//!
//! ## Features
//!
//! - Per-term frequency, positions, offsets and document frequency
//! - Field filtering and explicit document id selection
//! - Reference-counted index snapshots
//! - Shard fan-out and merge for distributed requests
//! - Ordered JSON responses

// Core modules
pub mod analysis;
pub mod component;
mod data;
mod error;
pub mod index;
pub mod request;
pub mod schema;
pub mod termvectors;

// Re-exports for the public API
pub use component::SearchComponent;
pub use data::{DataValue, Document};
pub use error::{ErrorCode, Result, TermVectorError};
pub use index::{IndexReader, MemoryIndex, SnapshotManager};
pub use request::{RequestContext, RequestParams, ResponseSection, SearchResponse, Stage};
pub use schema::Schema;
pub use termvectors::{
    TermVectorComponent, TermVectorConfig, TermVectorOptions, TermVectorsResponse,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
