//! Handler for the shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL, or returns the existing one for an identical long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "long_url": "https://example.com/some/page",
///   "expires_at": "2030-12-31T23:59:59Z"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_code": "0000001",
///   "short_url": "http://localhost:3000/0000001",
///   "long_url": "https://example.com/some/page",
///   "created_at": "2026-01-01T00:00:00Z",
///   "expires_at": "2030-12-31T23:59:59Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the URL is not `http(s)://` or longer than 2048 characters
/// - 503 if the store is unavailable
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let record = state
        .link_service
        .create(&payload.long_url, payload.expires_at)
        .await?;
    let short_url = state.link_service.short_url(&record.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::from_record(record, short_url)),
    ))
}
