//! Sequence-key persistence.
//!
//! The store has no multi-record transaction, so a reorder's sequence keys
//! are written one record at a time, strictly in mapping order, each update
//! awaited before the next is issued. In-order completion is what lets a
//! caller know, on failure, exactly how many leading writes are durable.
//! That count is carried on [`SyncFailure`] and nothing is rolled back.

use copydesk_core::ordering::SequenceMapping;
use copydesk_store::{RecordStore, StoreError};

use crate::error::EngineError;

/// A sequence commit that stopped partway through.
///
/// Updates `0..committed` are durable in the store; `committed..total`
/// were never attempted. The already-written prefix is left in place.
#[derive(Debug, thiserror::Error)]
#[error("sequence commit stopped after {committed} of {total} updates: {source}")]
pub struct SyncFailure {
    pub committed: usize,
    pub total: usize,
    #[source]
    pub source: StoreError,
}

/// Persist a sequence mapping to the store, one update at a time.
///
/// Returns the number of updates written (the mapping length) on full
/// success. On the first failed update the loop stops and the error
/// reports how many leading updates had already been committed.
pub async fn commit_sequence(
    store: &dyn RecordStore,
    collection: &str,
    mapping: &SequenceMapping,
) -> Result<usize, EngineError> {
    let total = mapping.len();
    let mut committed = 0usize;

    for (id, sort_order) in mapping {
        store
            .update(collection, id, serde_json::json!({ "sort_order": sort_order }))
            .await
            .map_err(|source| SyncFailure {
                committed,
                total,
                source,
            })?;
        committed += 1;
    }

    tracing::debug!(collection, updates = total, "sequence commit complete");
    Ok(committed)
}
