//! Handler for short URL deletion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base62::is_valid_code;

/// Deletes a short URL and evicts it from the cache.
///
/// # Endpoint
///
/// `DELETE /{code}`
///
/// The click log for the code is kept.
///
/// # Errors
///
/// - 404 if the code does not exist
/// - 503 if the store is unavailable
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    if !is_valid_code(&code) {
        return Err(AppError::not_found(
            "Short code not found",
            json!({ "code": code }),
        ));
    }

    state.link_service.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
