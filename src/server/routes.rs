//! Router configuration for the web server.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        // Analysis
        .route("/simplify", post(handlers::simplify))
        .route("/ask", post(handlers::ask))
        // Listings
        .route("/documents", get(handlers::list_documents))
        .route("/history", get(handlers::list_history))
        .route("/document/:doc_id", delete(handlers::delete_document))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
