//! API route configuration.

use crate::api::handlers::{click_list_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes.
///
/// # Endpoints
///
/// - `POST /shorten`              - Create (or reuse) a short URL
/// - `GET  /stats/{code}`         - Click counter and metadata
/// - `GET  /stats/{code}/clicks`  - Raw click events (paginated)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/stats/{code}/clicks", get(click_list_handler))
}
