//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::pagination::PaginationMeta;
use crate::domain::entities::Click;

/// Individual click event information.
///
/// Optional fields are omitted from JSON when `None` for cleaner responses.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub clicked_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl From<Click> for ClickInfo {
    fn from(click: Click) -> Self {
        Self {
            clicked_at: click.clicked_at,
            user_agent: click.user_agent,
            ip_address: click.ip_address,
        }
    }
}

/// A page of raw click events for one short code.
#[derive(Debug, Serialize)]
pub struct ClickListResponse {
    pub short_code: String,
    pub pagination: PaginationMeta,
    pub items: Vec<ClickInfo>,
}
