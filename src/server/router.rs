use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{documents, health, ratings, search};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// This function sets up:
/// - CORS middleware (permissive; the UI may be served from anywhere)
/// - Health check endpoint
/// - Document endpoints (upload, list, delete)
/// - Search endpoints (form and JSON)
/// - Rating and stats endpoints
pub fn router(state: Arc<AppState>) -> Router {
    // The request body must fit the configured upload limit plus
    // multipart framing overhead.
    let body_limit = state.settings.max_file_size as usize + 1024 * 1024;

    Router::new()
        .route("/health", get(health::health))
        .route("/upload", post(documents::upload_document))
        .route("/documents", get(documents::list_documents))
        .route("/documents/:filename", delete(documents::delete_document))
        .route("/search", post(search::search))
        .route("/search-json", post(search::search_json))
        .route("/rate-answer", post(ratings::rate_answer))
        .route("/ratings", get(ratings::get_ratings))
        .route("/stats", get(ratings::get_stats))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
