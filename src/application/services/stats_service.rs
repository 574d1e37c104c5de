//! Per-code statistics service.

use serde_json::json;
use std::sync::Arc;

use super::timeouts::Timeouts;
use crate::domain::entities::{Click, UrlRecord};
use crate::domain::repositories::{ClickRepository, UrlRepository};
use crate::error::AppError;

/// One page of raw click events plus the total count.
#[derive(Debug, Clone)]
pub struct ClickPage {
    pub total: i64,
    pub items: Vec<Click>,
}

/// Service for reading click counters and the click log.
///
/// Reads always go to the store; the cache only holds long URLs.
pub struct StatsService {
    urls: Arc<dyn UrlRepository>,
    clicks: Arc<dyn ClickRepository>,
    timeouts: Timeouts,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        clicks: Arc<dyn ClickRepository>,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            urls,
            clicks,
            timeouts,
        }
    }

    /// Returns the record for a code, including its click counter.
    ///
    /// Expired records are still reported.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    pub async fn get_stats(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.timeouts
            .store("find_by_code", self.urls.find_by_code(code))
            .await?
            .ok_or_else(|| AppError::not_found("Short code not found", json!({ "code": code })))
    }

    /// Lists recorded clicks for a code, newest first.
    ///
    /// Works for deleted codes too: the click log outlives its record.
    pub async fn list_clicks(
        &self,
        code: &str,
        offset: i64,
        limit: i64,
    ) -> Result<ClickPage, AppError> {
        let total = self
            .timeouts
            .store("count_by_code", self.clicks.count_by_code(code))
            .await?;
        let items = self
            .timeouts
            .store("list_by_code", self.clicks.list_by_code(code, offset, limit))
            .await?;

        Ok(ClickPage { total, items })
    }
}
