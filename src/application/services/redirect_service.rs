//! Short code resolution service.

use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use super::resilient_cache::ResilientCache;
use super::timeouts::Timeouts;
use crate::domain::click_event::{ClickEvent, ClientInfo};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Resolves short codes to long URLs, cache first.
///
/// # Resolution Flow
///
/// 1. Cache read. A hit records a click and returns immediately.
/// 2. On a miss (or a cache error or timeout) read the store.
/// 3. Unknown and expired records resolve to `None`. Expired records are
///    neither cached nor counted.
/// 4. Otherwise backfill the cache, record a click and return the URL.
///
/// A hit does not re-check expiry; cache entries never outlive their record
/// because their TTL is clamped at write time.
///
/// # Click Tracking
///
/// Clicks go to a bounded channel with `try_send`. When the queue is full the
/// click is dropped and counted in `clicks_dropped_total`; the redirect never
/// waits on analytics.
pub struct RedirectService {
    urls: Arc<dyn UrlRepository>,
    cache: ResilientCache,
    timeouts: Timeouts,
    click_sender: mpsc::Sender<ClickEvent>,
}

impl RedirectService {
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        cache: ResilientCache,
        timeouts: Timeouts,
        click_sender: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            urls,
            cache,
            timeouts,
            click_sender,
        }
    }

    /// Returns the long URL for a code, or `None` if it is unknown or expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UpstreamUnavailable`] when the cache misses and the
    /// store fails or times out. Cache failures alone never produce an error.
    pub async fn resolve(&self, code: &str, client: ClientInfo) -> Result<Option<String>, AppError> {
        if let Some(long_url) = self.cache.lookup(code).await {
            counter!("redirect_cache_hits_total").increment(1);
            debug!(code, "Cache HIT");
            self.record_click(code, client);
            return Ok(Some(long_url));
        }

        counter!("redirect_cache_misses_total").increment(1);
        debug!(code, "Cache MISS");

        let Some(record) = self
            .timeouts
            .store("find_by_code", self.urls.find_by_code(code))
            .await?
        else {
            return Ok(None);
        };

        if record.is_expired_at(Utc::now()) {
            debug!(code, "Short code expired");
            return Ok(None);
        }

        self.cache.warm(&record).await;
        self.record_click(code, client);

        Ok(Some(record.long_url))
    }

    fn record_click(&self, code: &str, client: ClientInfo) {
        match self.click_sender.try_send(ClickEvent::new(code, client)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                counter!("clicks_dropped_total").increment(1);
                warn!(code, "Click queue full, dropping click");
            }
            Err(TrySendError::Closed(_)) => {
                counter!("clicks_dropped_total").increment(1);
                warn!(code, "Click queue closed, dropping click");
            }
        }
    }
}
