//! Referential-integrity guard for category deletion.
//!
//! Articles point at a category through their `category` field. There is no
//! foreign-key constraint in the hosted store, so the guard runs a bounded
//! existence probe before any delete: one filtered query, limit 1, checking
//! for at least one referencing record. The guard never reads more than it
//! needs and never touches the referencing collection's records.

use copydesk_store::{Filter, RecordStore, StoreError};

/// Field on referencing records that carries the category id.
const REFERENCE_FIELD: &str = "category";

/// Checks whether a category is still referenced before it may be deleted.
#[derive(Debug, Clone)]
pub struct DeletionGuard {
    referencing_collection: String,
}

impl DeletionGuard {
    /// Guard against references from the named collection.
    pub fn new(referencing_collection: impl Into<String>) -> Self {
        Self {
            referencing_collection: referencing_collection.into(),
        }
    }

    /// Name of the collection this guard probes, for user-facing messages.
    pub fn referencing_collection(&self) -> &str {
        &self.referencing_collection
    }

    /// `true` iff no record in the referencing collection points at `id`.
    pub async fn can_delete(
        &self,
        store: &dyn RecordStore,
        id: &str,
    ) -> Result<bool, StoreError> {
        let filter = Filter::field_equals(REFERENCE_FIELD, id);
        let hits = store.query(&self.referencing_collection, &filter, 1).await?;
        Ok(hits.is_empty())
    }
}
