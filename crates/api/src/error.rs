use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use copydesk_core::CoreError;
use copydesk_engine::EngineError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`EngineError`] for domain and store failures and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure from the synchronization engine.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Engine(engine) => match engine {
                EngineError::Core(CoreError::NotFound { entity, id }) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} {id} not found"),
                ),
                EngineError::Core(CoreError::Validation(msg)) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                EngineError::InUse { .. } => {
                    (StatusCode::CONFLICT, "IN_USE", engine.to_string())
                }
                EngineError::Sync(failure) => {
                    // A durable prefix exists; tell the client exactly how
                    // much was written so it can prompt a reload.
                    tracing::error!(
                        committed = failure.committed,
                        total = failure.total,
                        error = %failure.source,
                        "reorder sync incomplete"
                    );
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "SYNC_INCOMPLETE",
                        format!(
                            "Order partially saved: {} of {} updates written",
                            failure.committed, failure.total
                        ),
                    )
                }
                EngineError::Load(err) | EngineError::Store(err) => {
                    tracing::error!(error = %err, "record store failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORE_ERROR",
                        "The record store could not complete the operation".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
