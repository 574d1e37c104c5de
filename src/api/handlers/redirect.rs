//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::net::SocketAddr;

use crate::domain::click_event::ClientInfo;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base62::is_valid_code;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its long URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject codes that cannot have been issued (wrong length or alphabet)
/// 2. Resolve through [`crate::application::services::RedirectService`]
///    (cache first, store fallback)
/// 3. Return `302 Found` with a `Location` header
///
/// The user agent and client address are captured for the click log. The
/// address comes from proxy headers only when `BEHIND_PROXY` is enabled.
///
/// # Errors
///
/// - 404 for unknown, deleted, or expired codes
/// - 503 if the cache misses and the store is unavailable
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if !is_valid_code(&code) {
        return Err(not_found(&code));
    }

    let client = ClientInfo::new(
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        Some(client_ip(&headers, peer, state.behind_proxy)),
    );

    match state.redirect_service.resolve(&code, client).await? {
        Some(long_url) => Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]).into_response()),
        None => Err(not_found(&code)),
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found(
        "Short code not found or expired",
        json!({ "code": code }),
    )
}
