//! Shared response envelope.
//!
//! Every successful API response wraps its payload in `{ "data": ... }`.
//! Using a typed envelope instead of ad-hoc `json!` keeps the shape
//! consistent across handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
