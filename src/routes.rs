//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{code}`               - Short URL redirect
//! - `DELETE /{code}`               - Delete a short URL
//! - `GET    /health`               - Health check: store, cache, click queue
//! - `POST   /shorten`              - Create a short URL
//! - `GET    /stats/{code}`         - Per-code statistics
//! - `GET    /stats/{code}/clicks`  - Per-code click log
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{delete_link_handler, health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with every route and the tracing layer.
///
/// Handlers read the peer address from `ConnectInfo`, so the router must be
/// served with `into_make_service_with_connect_info` (or given a
/// `MockConnectInfo` layer in tests).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler).delete(delete_link_handler))
        .merge(api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] wrapped in trailing-slash
/// normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
