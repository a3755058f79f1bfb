//! In-memory [`RecordStore`] used by tests and local development.
//!
//! Collections are plain vectors of JSON objects keyed by their `id` field.
//! Writes can be made to start failing after a configurable number of
//! successful updates, which is how the engine's partial-commit accounting
//! is exercised deterministically.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::RecordStore;

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, Vec<Value>>,
    /// When `Some(n)`, the n+1-th and every later update fails.
    updates_before_failure: Option<usize>,
    updates_applied: usize,
}

/// A process-local record store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record into a collection. The record must carry an `id`.
    pub fn insert(&self, collection: &str, record: Value) {
        debug_assert!(record.get("id").is_some(), "seeded record must have an id");
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    /// Snapshot of a collection's raw records, unordered.
    pub fn records(&self, collection: &str) -> Vec<Value> {
        let inner = self.inner.lock().expect("memory store poisoned");
        inner
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Look up one record by id.
    pub fn record(&self, collection: &str, id: &str) -> Option<Value> {
        self.records(collection)
            .into_iter()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
    }

    /// Allow the next `n` updates to succeed, then fail every update after
    /// that with an HTTP 500 until [`restore_writes`](Self::restore_writes)
    /// is called. The counter starts from the moment of this call.
    pub fn fail_updates_after(&self, n: usize) {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.updates_before_failure = Some(n);
        inner.updates_applied = 0;
    }

    /// Clear any injected write failure.
    pub fn restore_writes(&self) {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.updates_before_failure = None;
    }

    /// Number of updates durably applied since the last failure injection
    /// reset (or construction).
    pub fn updates_applied(&self) -> usize {
        self.inner.lock().expect("memory store poisoned").updates_applied
    }
}

/// Ascending comparison for sort keys; numbers before strings, anything
/// else compares equal.
fn compare_keys(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(_)), Some(Value::String(_))) => Ordering::Less,
        (Some(Value::String(_)), Some(Value::Number(_))) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn record_id_matches(record: &Value, id: &str) -> bool {
    record.get("id").and_then(Value::as_str) == Some(id)
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self, collection: &str, order_by: &str) -> Result<Vec<Value>, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        let mut records = inner
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default();
        records.sort_by(|a, b| compare_keys(a.get(order_by), b.get(order_by)));
        Ok(records)
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");

        if let Some(allowed) = inner.updates_before_failure {
            if inner.updates_applied >= allowed {
                return Err(StoreError::Api {
                    status: 500,
                    message: "injected write failure".to_string(),
                });
            }
        }

        let records = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        let record = records
            .iter_mut()
            .find(|r| record_id_matches(r, id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        let target = record.as_object_mut().ok_or_else(|| {
            StoreError::Decode(format!("record {id} in '{collection}' is not an object"))
        })?;
        match fields {
            Value::Object(patch) => {
                for (key, value) in patch {
                    target.insert(key, value);
                }
            }
            other => {
                return Err(StoreError::Decode(format!(
                    "update fields must be an object, got {other}"
                )))
            }
        }

        inner.updates_applied += 1;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        let records = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        let before = records.len();
        records.retain(|r| !record_id_matches(r, id));
        if records.len() == before {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Value>, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        let records = inner
            .collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(records
            .iter()
            .filter(|r| r.get(filter.field()).and_then(Value::as_str) == Some(filter.value()))
            .take(limit)
            .cloned()
            .collect())
    }
}
