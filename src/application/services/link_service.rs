//! Short URL creation and deletion service.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

use super::resilient_cache::ResilientCache;
use super::timeouts::Timeouts;
use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::base62;
use crate::utils::url_validator::validate_long_url;

/// Service for creating and deleting short URLs.
///
/// # Creation
///
/// 1. Validate the long URL (no I/O on failure)
/// 2. Reuse an unexpired record for the same long URL (deduplication)
/// 3. Insert a pending row to obtain a fresh identifier
/// 4. Encode the identifier and commit the row with its code
/// 5. Warm the cache (best-effort)
///
/// Steps 3 and 4 run inside one store transaction; if encoding fails or the
/// deadline elapses, the pending row is rolled back. No side effect is retried.
///
/// Deduplication is a read-then-insert and is not atomic: two concurrent
/// requests for the same new URL may both create a record.
pub struct LinkService {
    urls: Arc<dyn UrlRepository>,
    cache: ResilientCache,
    timeouts: Timeouts,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin used to build short URLs; a trailing
    /// slash is ignored.
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        cache: ResilientCache,
        timeouts: Timeouts,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            urls,
            cache,
            timeouts,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Shortens a long URL.
    ///
    /// When a live record for the identical long URL already exists it is
    /// returned unchanged, and `expires_at` is ignored. An expired match is
    /// left in place and a new code is issued.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is not `http(s)://` or too long
    /// - [`AppError::UpstreamUnavailable`] if the store fails or times out
    /// - [`AppError::Internal`] if the identifier cannot be encoded
    pub async fn create(
        &self,
        long_url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<UrlRecord, AppError> {
        validate_long_url(long_url).map_err(|e| {
            AppError::bad_request("Invalid long URL", json!({ "long_url": e.to_string() }))
        })?;

        let existing = self
            .timeouts
            .store("find_by_long_url", self.urls.find_by_long_url(long_url))
            .await?
            .filter(|record| !record.is_expired_at(Utc::now()));

        if let Some(existing) = existing {
            debug!(code = %existing.short_code, "Reusing existing short code");
            self.cache.warm(&existing).await;
            return Ok(existing);
        }

        let new_url = NewUrlRecord {
            long_url: long_url.to_string(),
            expires_at,
        };
        let record = self
            .timeouts
            .store("insert", self.insert_with_code(new_url))
            .await?;

        info!(code = %record.short_code, id = record.id, "Short URL created");
        self.cache.warm(&record).await;

        Ok(record)
    }

    async fn insert_with_code(&self, new_url: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let pending = self.urls.insert_pending(new_url).await?;

        let id = u64::try_from(pending.id()).map_err(|_| {
            AppError::internal(
                "Store returned a negative identifier",
                json!({ "id": pending.id() }),
            )
        })?;
        let code = base62::encode(id)?;

        pending.finalize_code(&code).await
    }

    /// Deletes a short URL and evicts its cache entry.
    ///
    /// Click history is kept.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no record has this code
    /// - [`AppError::UpstreamUnavailable`] if the store fails or times out
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        let deleted = self
            .timeouts
            .store("delete_by_code", self.urls.delete_by_code(code))
            .await?;

        if !deleted {
            return Err(AppError::not_found(
                "Short code not found",
                json!({ "code": code }),
            ));
        }

        self.cache.invalidate(code).await;
        info!(code, "Short URL deleted");
        Ok(())
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
