//! Handler for per-code statistics.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base62::is_valid_code;

/// Returns the click counter and metadata for a short code.
///
/// # Endpoint
///
/// `GET /stats/{code}`
///
/// Expired codes are still reported.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    if !is_valid_code(&code) {
        return Err(AppError::not_found(
            "Short code not found",
            json!({ "code": code }),
        ));
    }

    let record = state.stats_service.get_stats(&code).await?;
    Ok(Json(record.into()))
}
