//! Handler for the raw click log of a short code.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::clicks::{ClickInfo, ClickListResponse};
use crate::api::dto::pagination::PaginationParams;
use crate::error::AppError;
use crate::state::AppState;

/// Lists recorded clicks for a short code, newest first.
///
/// # Endpoint
///
/// `GET /stats/{code}/clicks`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 100)
///
/// Clicks of deleted codes remain listed.
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn click_list_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ClickListResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = state
        .stats_service
        .list_clicks(&code, offset, limit)
        .await?;

    Ok(Json(ClickListResponse {
        short_code: code,
        pagination: params.meta(page.total),
        items: page.items.into_iter().map(ClickInfo::from).collect(),
    }))
}
