//! HTTP server for the risk register
//!
//! Handlers stay thin: validate, classify, persist, respond. Each request
//! opens its own SQLite connection against the configured path, so no
//! mutable state is shared across requests.

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for the web server
pub struct AppState {
    /// Database path; handlers open per-request connections against it
    pub db_path: PathBuf,
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::health))
        .route("/assess-risk", post(routes::assess_risk))
        .route("/risks", get(routes::list_risks))
        .route("/risks/summary", get(routes::risk_summary))
        .route("/risks/matrix", get(routes::risk_matrix))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Start the web server
pub async fn start_server(listen: &str, db_path: PathBuf) -> anyhow::Result<()> {
    // Run the idempotent schema step before accepting requests
    crate::db::Database::open(&db_path)?;

    let state = Arc::new(AppState { db_path });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(listen).await?;

    info!("🌐 Web server starting on http://{}", listen);

    axum::serve(listener, app).await?;

    Ok(())
}
