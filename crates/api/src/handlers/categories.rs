//! Handlers for category management.
//!
//! Every mutating handler acquires the manager lock for the whole
//! operation; that lock is the concurrency guarantee the engine requires
//! (no overlapping reorder, delete, or toggle against the same
//! collection).

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use copydesk_core::category::{CategoryRecord, UpdateCategory};
use copydesk_core::types::RecordId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Query string for GET /categories.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Search filter; empty or absent means "everything".
    pub q: Option<String>,
}

/// Request body for PUT /categories/reorder.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub source_id: RecordId,
    pub target_id: RecordId,
}

/// Response for PUT /categories/reorder.
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    /// Number of records whose sequence key was rewritten.
    pub updated: usize,
}

/// Response for POST /categories/{id}/toggle.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// List / search
// ---------------------------------------------------------------------------

/// GET /api/v1/categories?q=
///
/// Returns the cached collection, display-ordered, filtered through the
/// search projection when `q` is present.
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let manager = state.manager.lock().await;
    let query = params.q.unwrap_or_default();
    let data: Vec<CategoryRecord> = manager.project(&query).cloned().collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/categories/refresh
///
/// Reload the whole collection from the store and return it.
pub async fn refresh_categories(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let mut manager = state.manager.lock().await;
    manager.refresh().await?;
    let data: Vec<CategoryRecord> = manager.snapshot().to_vec();
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

/// PUT /api/v1/categories/reorder
///
/// Move `source_id` immediately before `target_id` and persist the new
/// sequence keys.
pub async fn reorder_categories(
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let mut manager = state.manager.lock().await;
    manager.begin_drag(&input.source_id)?;
    let updated = manager.drop_on(&input.target_id).await?;

    tracing::info!(
        source_id = %input.source_id,
        target_id = %input.target_id,
        updated,
        "categories reordered"
    );

    Ok(Json(DataResponse {
        data: ReorderResponse { updated },
    }))
}

// ---------------------------------------------------------------------------
// Toggle / edit
// ---------------------------------------------------------------------------

/// POST /api/v1/categories/{id}/toggle
pub async fn toggle_category(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let mut manager = state.manager.lock().await;
    let is_active = manager.toggle_active(&id).await?;
    Ok(Json(DataResponse {
        data: ToggleResponse { is_active },
    }))
}

/// PATCH /api/v1/categories/{id}
///
/// Edit non-ordering fields. The slug and the sequence key cannot be
/// changed here.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(patch): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let mut manager = state.manager.lock().await;
    let data = manager.update_fields(&id, &patch).await?;
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/v1/categories/{id}
///
/// Fails with 409 while any article still references the category.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let mut manager = state.manager.lock().await;
    let data = manager.delete(&id).await?;
    Ok(Json(DataResponse { data }))
}
