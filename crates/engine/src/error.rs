use copydesk_core::types::RecordId;
use copydesk_core::CoreError;
use copydesk_store::StoreError;

use crate::sync::SyncFailure;

/// Failures surfaced by engine operations.
///
/// Every variant is caught at the operation boundary, logged, and turned
/// into a notification; nothing here is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The full-collection fetch failed; the prior cache (if any) is kept.
    #[error("failed to load categories: {0}")]
    Load(#[source] StoreError),

    /// A domain-level failure (unknown id, invalid field value).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A reorder commit stopped partway; see [`SyncFailure`] for the
    /// durable-prefix accounting.
    #[error(transparent)]
    Sync(#[from] SyncFailure),

    /// Deletion was blocked because records elsewhere still reference the
    /// category.
    #[error("category {id} is still referenced by records in '{referencing}'")]
    InUse {
        id: RecordId,
        referencing: String,
    },

    /// A single-record store call failed.
    #[error("record store operation failed: {0}")]
    Store(#[from] StoreError),
}
