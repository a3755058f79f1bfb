//! The canonical in-memory category list.
//!
//! The cache is the single source of truth for rendering and reorder
//! planning. It is loaded wholesale from the store and mutated only through
//! its own API; the search projection and the reorder planner read
//! snapshots, they never write.
//!
//! Sequence-key contiguity is a quiescence property, not an invariant of
//! every intermediate state: a deletion leaves a gap that is never repaired
//! here, and a partially committed reorder leaves the keys wherever the
//! commit stopped.

use copydesk_core::category::CategoryRecord;
use copydesk_core::types::RecordId;
use copydesk_store::RecordStore;

use crate::error::EngineError;

/// Ordered set of all category records, keyed by `id`.
#[derive(Debug, Default)]
pub struct CollectionCache {
    /// Kept sorted by `(sort_order, name)`, the display order. The name
    /// tie-break keeps the order deterministic while duplicate keys exist
    /// transiently.
    records: Vec<CategoryRecord>,
}

impl CollectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole cache from a full-collection fetch.
    ///
    /// On any failure (transport, API, or a record that does not decode)
    /// the prior contents are left untouched and the error is returned.
    pub async fn load(
        &mut self,
        store: &dyn RecordStore,
        collection: &str,
    ) -> Result<(), EngineError> {
        let raw = store
            .list(collection, "sort_order")
            .await
            .map_err(EngineError::Load)?;

        let mut records = Vec::with_capacity(raw.len());
        for value in raw {
            let record: CategoryRecord = serde_json::from_value(value).map_err(|e| {
                EngineError::Load(copydesk_store::StoreError::Decode(e.to_string()))
            })?;
            records.push(record);
        }

        self.records = records;
        self.sort();
        tracing::debug!(collection, count = self.records.len(), "category cache loaded");
        Ok(())
    }

    /// Insert or replace a record by `id`. Never fails.
    pub fn upsert(&mut self, record: CategoryRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        self.sort();
    }

    /// Remove a record by `id`, returning it if present. The sequence-key
    /// gap this leaves is deliberate; downstream ordering tolerates gaps.
    pub fn remove(&mut self, id: &str) -> Option<CategoryRecord> {
        let idx = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&CategoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// The records in display order.
    pub fn snapshot(&self) -> &[CategoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply confirmed sequence keys to the cached records and re-sort.
    ///
    /// Entries whose id is no longer cached are skipped. Callers pass the
    /// full mapping after a complete commit, or only the durable prefix
    /// after a partial one, so the cache mirrors exactly what the store
    /// accepted.
    pub fn apply_sequence(&mut self, entries: &[(RecordId, i32)]) {
        for (id, sort_order) in entries {
            if let Some(record) = self.records.iter_mut().find(|r| r.id == *id) {
                record.sort_order = *sort_order;
            }
        }
        self.sort();
    }

    fn sort(&mut self) {
        self.records
            .sort_by(|a, b| (a.sort_order, &a.name).cmp(&(b.sort_order, &b.name)));
    }
}
