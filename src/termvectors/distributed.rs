//! Fan-out and merge of term vector requests across shards.
//!
//! Once the ranked result list is known, each shard is asked for the term
//! vectors of the documents it owns. The sub-request carries the original
//! parameters without the query and with `tv.docIds` set to the shard-local
//! ids. Partial responses are concatenated as they are handed to
//! [`merge_shard_responses`]; restoring the ranked order is up to the caller.

use ahash::AHashMap;

use crate::error::{Result, TermVectorError};
use crate::request::{QUERY, RequestParams, ShardDoc, ShardPurpose, ShardRequest};
use crate::termvectors::COMPONENT_NAME;
use crate::termvectors::params::DOC_IDS;
use crate::termvectors::response::TermVectorsResponse;

/// Group documents by owning shard, shards in order of first appearance.
pub fn group_by_shard(docs: &[ShardDoc]) -> Vec<(&str, Vec<&ShardDoc>)> {
    let mut slots: AHashMap<&str, usize> = AHashMap::new();
    let mut groups: Vec<(&str, Vec<&ShardDoc>)> = Vec::new();

    for doc in docs {
        let slot = *slots.entry(doc.shard.as_str()).or_insert_with(|| {
            groups.push((doc.shard.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(doc);
    }

    groups
}

/// Build one `GetFields` sub-request per shard owning at least one document.
pub fn build_shard_requests(params: &RequestParams, docs: &[ShardDoc]) -> Vec<ShardRequest> {
    // every group holds at least one document
    group_by_shard(docs)
        .into_iter()
        .map(|(shard, shard_docs)| {
            let mut shard_params = params.clone();
            shard_params.remove(QUERY);
            let ids: Vec<String> = shard_docs.iter().map(|d| d.id.to_string()).collect();
            shard_params.set(DOC_IDS, ids.join(","));

            ShardRequest {
                purpose: ShardPurpose::GetFields,
                shards: vec![shard.to_string()],
                params: shard_params,
                requester: COMPONENT_NAME.to_string(),
            }
        })
        .collect()
}

/// Outcome of one shard sub-request.
#[derive(Debug)]
pub struct ShardResponse {
    pub shard: String,
    pub result: Result<TermVectorsResponse>,
}

impl ShardResponse {
    pub fn new(shard: impl Into<String>, result: Result<TermVectorsResponse>) -> Self {
        Self {
            shard: shard.into(),
            result,
        }
    }
}

/// Concatenate partial responses in the order given.
///
/// Any failed shard fails the whole merge. Documents are neither
/// deduplicated nor reordered.
pub fn merge_shard_responses(
    unique_key_field: &str,
    responses: impl IntoIterator<Item = ShardResponse>,
) -> Result<TermVectorsResponse> {
    let mut merged = TermVectorsResponse::new(unique_key_field);

    for response in responses {
        let partial = response
            .result
            .map_err(|e| TermVectorError::ShardFailure {
                shard: response.shard.clone(),
                message: e.to_string(),
            })?;

        if partial.unique_key_field_name() != unique_key_field {
            return Err(TermVectorError::ShardFailure {
                shard: response.shard,
                message: format!(
                    "unique key field '{}' does not match '{unique_key_field}'",
                    partial.unique_key_field_name()
                ),
            });
        }

        log::debug!(
            "merging {} term vector documents from shard '{}'",
            partial.len(),
            response.shard
        );
        merged.append(partial);
    }

    Ok(merged)
}
