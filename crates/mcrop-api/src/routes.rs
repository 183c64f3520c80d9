//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{download, health, preview, process};
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    // Thumbnails and outputs are served pass-through, no handler logic.
    let serve_thumbs = ServeDir::new(state.store.thumbs_dir());
    let serve_output = ServeDir::new(state.store.output_dir());

    Router::new()
        .route("/preview", post(preview))
        .route("/process", post(process))
        .route("/download/:filename", get(download))
        .route("/health", get(health))
        .nest_service("/thumbs", serve_thumbs)
        .nest_service("/output", serve_output)
        // Uploads are large; lift axum's 2 MiB default up to the configured
        // bound instead.
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
