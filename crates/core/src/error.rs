use crate::types::RecordId;

/// Domain-level errors shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: RecordId },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a missing category, the only entity this workspace owns.
    pub fn category_not_found(id: impl Into<RecordId>) -> Self {
        CoreError::NotFound {
            entity: "category",
            id: id.into(),
        }
    }
}
