//! Record store client boundary.
//!
//! The hosted data store exposes only single-record primitives: list a
//! collection, patch one record, delete one record, run one filtered query.
//! There is no batching and no multi-record transaction, and nothing in this
//! crate pretends otherwise: callers that need multi-record effects must
//! sequence individual calls and account for partial failure themselves.
//!
//! Two implementations are provided:
//! - [`HttpRecordStore`] speaks the hosted store's REST API via `reqwest`.
//! - [`MemoryRecordStore`] keeps collections in process memory and supports
//!   deterministic write-failure injection, which the engine's
//!   partial-failure tests rely on.

pub mod error;
pub mod filter;
pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

pub use error::StoreError;
pub use filter::Filter;
pub use http::HttpRecordStore;
pub use memory::MemoryRecordStore;

/// Client-side view of the hosted record store.
///
/// Records cross this boundary as raw JSON objects; typed decoding happens
/// in the layer that knows the collection's shape.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every record in `collection`, ordered by the named field
    /// ascending.
    async fn list(&self, collection: &str, order_by: &str) -> Result<Vec<Value>, StoreError>;

    /// Patch a single record. Only the provided fields are written.
    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError>;

    /// Delete a single record.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Fetch at most `limit` records matching `filter`.
    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Value>, StoreError>;
}
