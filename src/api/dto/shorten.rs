//! DTOs for the shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;
use crate::utils::url_validator::validate_long_url_field;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten; must start with `http://` or `https://`.
    #[validate(custom(function = "validate_long_url_field"))]
    pub long_url: String,

    /// Optional expiry. After this instant the code resolves to 404.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A created (or reused) short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenResponse {
    pub fn from_record(record: UrlRecord, short_url: String) -> Self {
        Self {
            short_code: record.short_code,
            short_url,
            long_url: record.long_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }
}
