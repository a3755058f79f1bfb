use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use copydesk_api::config::ApiConfig;
use copydesk_api::router::build_router;
use copydesk_api::state::AppState;
use copydesk_engine::CategoryManager;
use copydesk_events::NotificationHub;
use copydesk_store::HttpRecordStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "copydesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ApiConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, store = %config.store_url, "Loaded configuration");

    // --- Engine ---
    let store = Arc::new(HttpRecordStore::new(config.store_url.as_str()));
    let hub = NotificationHub::default();
    let mut manager = CategoryManager::new(store, config.collection_names(), hub);

    // Warm the cache. A failure here is not fatal: the engine keeps an
    // empty cache and the client can hit /categories/refresh to retry.
    if let Err(err) = manager.refresh().await {
        tracing::warn!(error = %err, "initial category load failed; starting with an empty cache");
    } else {
        tracing::info!(count = manager.snapshot().len(), "category cache warmed");
    }

    let state = AppState::new(manager);

    // --- Router ---
    let app = build_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
