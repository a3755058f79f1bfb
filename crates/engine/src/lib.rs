//! Ordered-collection synchronization engine.
//!
//! Owns the canonical in-memory category list and every mutation path over
//! it: full reload, field edits, activation toggles, drag-and-drop
//! reordering with sequence-key persistence, and reference-guarded
//! deletion. The hosted store offers no multi-record transactions, so the
//! reorder commit is an explicitly sequential, partial-failure-aware loop;
//! see [`sync`].
//!
//! [`manager::CategoryManager`] is the operation boundary: it serializes
//! operations (one at a time, by `&mut self`), converts store failures into
//! notifications, and never lets them escape to crash the session.

pub mod cache;
pub mod error;
pub mod guard;
pub mod manager;
pub mod sync;

pub use cache::CollectionCache;
pub use error::EngineError;
pub use guard::DeletionGuard;
pub use manager::{CategoryManager, CollectionNames};
pub use sync::{commit_sequence, SyncFailure};
