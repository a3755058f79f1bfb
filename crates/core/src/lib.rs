//! Copydesk domain logic.
//!
//! Pure types and functions shared by the engine, the store client, and the
//! API layer. This crate has zero internal dependencies so that ordering and
//! search behavior can be exercised without a store or a runtime.

pub mod category;
pub mod error;
pub mod ordering;
pub mod search;
pub mod types;

pub use category::{CategoryRecord, UpdateCategory};
pub use error::CoreError;
pub use ordering::{plan_move, SequenceMapping};
