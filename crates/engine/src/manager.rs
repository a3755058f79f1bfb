//! The operation boundary for category management.
//!
//! [`CategoryManager`] owns the collection cache, the pending-drag slot,
//! the deletion guard, and the notification hub. Operations take `&mut
//! self`, which serializes them: no second reorder, delete, or toggle can
//! start while one is in flight. Store-facing failures are caught here,
//! logged, published as error notifications, and returned as typed errors.
//! Nothing is retried and nothing is allowed to crash the session.

use std::sync::Arc;

use copydesk_core::category::{CategoryRecord, UpdateCategory};
use copydesk_core::ordering::plan_move;
use copydesk_core::search;
use copydesk_core::types::RecordId;
use copydesk_core::CoreError;
use copydesk_events::{Notification, NotificationHub};
use copydesk_store::RecordStore;
use validator::Validate;

use crate::cache::CollectionCache;
use crate::error::EngineError;
use crate::guard::DeletionGuard;
use crate::sync::commit_sequence;

/// Store collection names the engine operates on.
#[derive(Debug, Clone)]
pub struct CollectionNames {
    /// The collection this engine owns and mutates.
    pub categories: String,
    /// The read-only collection whose records reference categories.
    pub articles: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            categories: "categories".to_string(),
            articles: "articles".to_string(),
        }
    }
}

/// Owns all mutable state for one category collection.
pub struct CategoryManager {
    store: Arc<dyn RecordStore>,
    names: CollectionNames,
    cache: CollectionCache,
    guard: DeletionGuard,
    /// Id of the record currently lifted for a drag, if any. Set by
    /// [`begin_drag`](Self::begin_drag), cleared unconditionally at the end
    /// of every drop attempt, including failed ones.
    pending_drag: Option<RecordId>,
    hub: NotificationHub,
}

impl CategoryManager {
    pub fn new(store: Arc<dyn RecordStore>, names: CollectionNames, hub: NotificationHub) -> Self {
        let guard = DeletionGuard::new(names.articles.clone());
        Self {
            store,
            names,
            cache: CollectionCache::new(),
            guard,
            pending_drag: None,
            hub,
        }
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// Current display-ordered records.
    pub fn snapshot(&self) -> &[CategoryRecord] {
        self.cache.snapshot()
    }

    /// Project the cache through the search filter; canonical order is
    /// preserved and the cache is untouched.
    pub fn project<'a>(
        &'a self,
        query: &'a str,
    ) -> impl Iterator<Item = &'a CategoryRecord> + 'a {
        search::project(self.cache.snapshot(), query)
    }

    /// Id of the record currently lifted for a drag, if any.
    pub fn pending_drag(&self) -> Option<&str> {
        self.pending_drag.as_deref()
    }

    pub fn hub(&self) -> &NotificationHub {
        &self.hub
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    /// Reload the whole collection from the store.
    ///
    /// On failure the prior cache is kept (possibly stale, possibly empty)
    /// and the user is told to retry.
    pub async fn refresh(&mut self) -> Result<(), EngineError> {
        if let Err(err) = self.cache.load(self.store.as_ref(), &self.names.categories).await {
            tracing::error!(error = %err, "category reload failed");
            self.hub
                .publish(Notification::error("Failed to load categories"));
            return Err(err);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Field mutations
    // -----------------------------------------------------------------------

    /// Flip a category's active flag, persisting before the cache is
    /// touched.
    pub async fn toggle_active(&mut self, id: &str) -> Result<bool, EngineError> {
        let mut record = self
            .cache
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::category_not_found(id))?;
        let activate = !record.is_active;

        if let Err(source) = self
            .store
            .update(
                &self.names.categories,
                id,
                serde_json::json!({ "is_active": activate }),
            )
            .await
        {
            tracing::error!(id, error = %source, "toggle failed");
            self.hub.publish(Notification::error(format!(
                "Could not update '{}'",
                record.name
            )));
            return Err(source.into());
        }

        record.is_active = activate;
        let state = if activate { "shown" } else { "hidden" };
        self.hub.publish(Notification::success(format!(
            "'{}' is now {state}",
            record.name
        )));
        self.cache.upsert(record);
        Ok(activate)
    }

    /// Apply a non-ordering field patch. The slug never changes and the
    /// sequence key only moves through the reorder flow.
    pub async fn update_fields(
        &mut self,
        id: &str,
        patch: &UpdateCategory,
    ) -> Result<CategoryRecord, EngineError> {
        patch
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let mut record = self
            .cache
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::category_not_found(id))?;
        if patch.is_empty() {
            return Ok(record);
        }

        if let Err(source) = self
            .store
            .update(&self.names.categories, id, patch.to_fields())
            .await
        {
            tracing::error!(id, error = %source, "field update failed");
            self.hub.publish(Notification::error(format!(
                "Could not save changes to '{}'",
                record.name
            )));
            return Err(source.into());
        }

        patch.apply_to(&mut record);
        self.hub.publish(Notification::success(format!(
            "Changes to '{}' saved",
            record.name
        )));
        self.cache.upsert(record.clone());
        Ok(record)
    }

    // -----------------------------------------------------------------------
    // Reorder
    // -----------------------------------------------------------------------

    /// Lift a record for dragging. Fails on a stale id; a drag can only
    /// start from a rendered row, so this is log-worthy, not toast-worthy.
    pub fn begin_drag(&mut self, id: &str) -> Result<(), EngineError> {
        if self.cache.get(id).is_none() {
            tracing::debug!(id, "drag start on unknown id ignored");
            return Err(CoreError::category_not_found(id).into());
        }
        self.pending_drag = Some(id.to_string());
        Ok(())
    }

    /// Abort the drag without any store interaction.
    pub fn cancel_drag(&mut self) {
        self.pending_drag = None;
    }

    /// Drop the lifted record immediately before `target_id` and persist
    /// the resulting sequence keys.
    ///
    /// Returns the number of records written. The pending-drag slot is
    /// cleared no matter how the drop ends. On a partial commit the cache
    /// is reconciled for exactly the durable prefix; the already-written
    /// records are not rolled back.
    pub async fn drop_on(&mut self, target_id: &str) -> Result<usize, EngineError> {
        let Some(source_id) = self.pending_drag.take() else {
            tracing::debug!(target_id, "drop without an active drag ignored");
            return Ok(0);
        };

        let mapping = match plan_move(self.cache.snapshot(), &source_id, target_id) {
            Ok(mapping) => mapping,
            Err(err) => {
                // A stale id after a concurrent delete; nothing was written.
                tracing::debug!(%source_id, target_id, error = %err, "reorder aborted");
                return Err(err.into());
            }
        };
        if mapping.is_empty() {
            return Ok(0);
        }

        match commit_sequence(self.store.as_ref(), &self.names.categories, &mapping).await {
            Ok(written) => {
                self.cache.apply_sequence(&mapping);
                tracing::info!(written, "category order saved");
                self.hub
                    .publish(Notification::success("Category order saved"));
                Ok(written)
            }
            Err(EngineError::Sync(failure)) => {
                self.cache.apply_sequence(&mapping[..failure.committed]);
                tracing::warn!(
                    committed = failure.committed,
                    total = failure.total,
                    error = %failure.source,
                    "category reorder partially committed"
                );
                self.hub.publish(Notification::error(format!(
                    "Category order was only partially saved ({} of {} updates written)",
                    failure.committed, failure.total
                )));
                Err(EngineError::Sync(failure))
            }
            Err(other) => {
                self.hub
                    .publish(Notification::error("Could not save category order"));
                Err(other)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Delete a category unless articles still reference it.
    ///
    /// The remaining records keep their sequence keys; the gap a deletion
    /// leaves is never renumbered automatically.
    pub async fn delete(&mut self, id: &str) -> Result<CategoryRecord, EngineError> {
        let record = self
            .cache
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::category_not_found(id))?;

        let clear = match self.guard.can_delete(self.store.as_ref(), id).await {
            Ok(clear) => clear,
            Err(source) => {
                tracing::error!(id, error = %source, "reference probe failed");
                self.hub.publish(Notification::error(format!(
                    "Could not check whether '{}' is still in use",
                    record.name
                )));
                return Err(source.into());
            }
        };
        if !clear {
            self.hub.publish(Notification::error(format!(
                "'{}' is still used by {} and cannot be deleted",
                record.name,
                self.guard.referencing_collection()
            )));
            return Err(EngineError::InUse {
                id: id.to_string(),
                referencing: self.guard.referencing_collection().to_string(),
            });
        }

        if let Err(source) = self.store.delete(&self.names.categories, id).await {
            tracing::error!(id, error = %source, "category delete failed");
            self.hub.publish(Notification::error(format!(
                "Could not delete '{}'",
                record.name
            )));
            return Err(source.into());
        }

        self.cache.remove(id);
        tracing::info!(id, name = %record.name, "category deleted");
        self.hub
            .publish(Notification::success(format!("'{}' deleted", record.name)));
        Ok(record)
    }
}
