//! Term vector component.
//!
//! Reports, for the documents of a search result (or an explicit list of
//! document ids), the terms of each field together with any of: frequency,
//! positions, offsets, document frequency and the `freq / df` ratio.
//!
//! # Module Structure
//!
//! - `params`: request parameters and [`TermVectorOptions`]
//! - `extractor`: per-term statistics from a document's term vectors
//! - `assembler`: builds the response over a sequence of documents
//! - `response`: response structures and their serialized form
//! - `distributed`: shard fan-out and merge of partial responses
//! - `config`: component configuration
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use termvectors::{Document, SearchComponent, TermVectorComponent, TermVectorConfig};
//! use termvectors::index::{MemoryIndex, SnapshotManager};
//! use termvectors::request::{RequestContext, RequestParams};
//! use termvectors::schema::{KeywordOption, Schema, TextOption};
//!
//! let schema = Schema::builder("id")
//!     .add_keyword_field("id", KeywordOption::default())
//!     .add_text_field("title", TextOption::with_full_term_vectors())
//!     .build();
//! let index = MemoryIndex::builder(schema.clone())
//!     .add_document(Document::new().add_string("id", "a").add_text("title", "hello world"))
//!     .build()
//!     .unwrap();
//!
//! let mut component = TermVectorComponent::new(TermVectorConfig::default()).unwrap();
//! component
//!     .attach(Arc::new(SnapshotManager::new(Arc::new(index))), Arc::new(schema))
//!     .unwrap();
//!
//! let params = RequestParams::new().with("tv", "true").with("tv.tf", "true");
//! let mut ctx = RequestContext::new(params).with_results(vec![0]);
//! component.process(&mut ctx).unwrap();
//!
//! let section = ctx.response.get("termVectors").unwrap();
//! let json = serde_json::to_value(section).unwrap();
//! assert_eq!(json["doc-0"]["title"]["hello"]["freq"], 1);
//! ```

pub mod assembler;
pub mod config;
pub mod distributed;
pub mod extractor;
pub mod params;
pub mod response;

use std::sync::Arc;

use crate::component::SearchComponent;
use crate::error::{Result, TermVectorError};
use crate::index::snapshot::SnapshotManager;
use crate::request::{RequestContext, RequestParams, Stage};
use crate::schema::Schema;

pub use assembler::ResponseAssembler;
pub use config::TermVectorConfig;
pub use distributed::{ShardResponse, build_shard_requests, merge_shard_responses};
pub use extractor::{FieldTermKey, FieldTermStats, TermStatsExtractor};
pub use params::TermVectorOptions;
pub use response::{DocumentVector, FieldVector, TermStat, TermVectorsResponse};

/// Component name, also the enabling request parameter.
pub const COMPONENT_NAME: &str = "tv";

#[derive(Debug)]
struct IndexBinding {
    snapshots: Arc<SnapshotManager>,
    schema: Arc<Schema>,
}

/// Search component returning term vectors for result documents.
#[derive(Debug)]
pub struct TermVectorComponent {
    config: TermVectorConfig,
    binding: Option<IndexBinding>,
}

impl TermVectorComponent {
    pub fn new(config: TermVectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            binding: None,
        })
    }

    /// Bind the component to the index it reads from.
    pub fn attach(&mut self, snapshots: Arc<SnapshotManager>, schema: Arc<Schema>) -> Result<()> {
        schema.validate()?;
        self.binding = Some(IndexBinding { snapshots, schema });
        Ok(())
    }

    pub fn config(&self) -> &TermVectorConfig {
        &self.config
    }

    pub fn is_enabled(&self, params: &RequestParams) -> Result<bool> {
        params.get_bool(params::TV, self.config.enabled_by_default)
    }

    /// Term vectors for a request.
    ///
    /// Returns `None` when the request does not enable the component.
    /// Explicit `tv.docIds` take precedence over `results`. Parameters are
    /// validated before the index snapshot is acquired.
    pub fn handle(
        &self,
        params: &RequestParams,
        results: &[u64],
    ) -> Result<Option<TermVectorsResponse>> {
        if !self.is_enabled(params)? {
            return Ok(None);
        }

        let options = TermVectorOptions::from_params(params)?;
        let binding = self.binding()?;
        let doc_ids = options.doc_ids().unwrap_or(results);

        let snapshot = binding.snapshots.acquire();
        let assembler =
            ResponseAssembler::new(snapshot.reader(), &options, binding.schema.unique_key());
        let response = assembler.assemble(doc_ids.iter().copied())?;

        log::debug!(
            "term vectors for {} documents from snapshot generation {}",
            response.len(),
            snapshot.generation()
        );
        Ok(Some(response))
    }

    fn binding(&self) -> Result<&IndexBinding> {
        self.binding.as_ref().ok_or_else(|| {
            TermVectorError::InvalidOperation(
                "term vector component is not attached to an index".to_string(),
            )
        })
    }
}

impl SearchComponent for TermVectorComponent {
    fn name(&self) -> &str {
        COMPONENT_NAME
    }

    fn description(&self) -> &str {
        "A component for working with term vectors"
    }

    fn process(&self, ctx: &mut RequestContext) -> Result<()> {
        if let Some(response) = self.handle(&ctx.params, &ctx.results)? {
            ctx.response.add(self.config.response_key.clone(), response);
        }
        Ok(())
    }

    fn distributed_process(&self, ctx: &mut RequestContext) -> Result<Stage> {
        if ctx.stage == Stage::GetFields && self.is_enabled(&ctx.params)? {
            let requests = build_shard_requests(&ctx.params, &ctx.shard_docs);
            log::debug!(
                "fanning out term vector requests to {} shards",
                requests.len()
            );
            for request in requests {
                ctx.add_request(request);
            }
        }
        Ok(Stage::Done)
    }
}
