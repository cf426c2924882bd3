pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::import::handlers;
use crate::linkedin::handlers::handle_import_profile;
use crate::state::AppState;

/// Room for multipart boundaries and form fields around the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/import/linkedin-pdf",
            post(handlers::handle_import_pdf),
        )
        .route(
            "/api/v1/import/linkedin-text",
            post(handlers::handle_import_text),
        )
        .route(
            "/api/v1/import/linkedin-profile",
            post(handle_import_profile),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
