//! Shared application router builder.
//!
//! Both the production binary and the integration tests construct the app
//! through [`build_router`] so they exercise the same middleware stack.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, patch, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ApiConfig;
use crate::handlers::{categories, health};
use crate::state::AppState;

/// Build the full application [`Router`].
///
/// Middleware (applied bottom-up): CORS, then structured request/response
/// tracing.
pub fn build_router(state: AppState, config: &ApiConfig) -> Router {
    Router::new()
        // Health check at root level (not under /api/v1).
        .merge(health::router())
        .nest("/api/v1", api_routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// The `/api/v1` route tree.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list_categories))
        .route("/categories/refresh", post(categories::refresh_categories))
        .route("/categories/reorder", put(categories::reorder_categories))
        .route(
            "/categories/{id}",
            patch(categories::update_category).delete(categories::delete_category),
        )
        .route("/categories/{id}/toggle", post(categories::toggle_category))
}

fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE])
}
