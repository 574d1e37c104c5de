//! Best-effort wrapper around the cache backend.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::timeouts::Timeouts;
use crate::domain::entities::UrlRecord;
use crate::infrastructure::cache::CacheService;

/// Cache access that never fails the caller.
///
/// Every call is bounded by the cache deadline. Errors and timeouts are
/// logged at `warn` and reported as a miss (reads) or ignored (writes).
#[derive(Clone)]
pub struct ResilientCache {
    backend: Arc<dyn CacheService>,
    default_ttl: Duration,
    timeouts: Timeouts,
}

impl ResilientCache {
    pub fn new(backend: Arc<dyn CacheService>, default_ttl: Duration, timeouts: Timeouts) -> Self {
        Self {
            backend,
            default_ttl,
            timeouts,
        }
    }

    /// Returns the cached long URL, or `None` on a miss, error, or timeout.
    pub async fn lookup(&self, code: &str) -> Option<String> {
        match self.timeouts.cache("get", self.backend.get(code)).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(code, error = %e, "Cache read failed, falling back to store");
                None
            }
        }
    }

    /// Caches a record's long URL.
    ///
    /// The TTL is the default TTL clamped to the record's remaining lifetime;
    /// records about to expire (or already expired) are not cached.
    pub async fn warm(&self, record: &UrlRecord) {
        let Some(ttl) = record.cache_ttl(self.default_ttl, Utc::now()) else {
            debug!(code = %record.short_code, "Skipping cache warm for expiring record");
            return;
        };

        let write = self
            .backend
            .set_with_ttl(&record.short_code, &record.long_url, ttl);
        if let Err(e) = self.timeouts.cache("set", write).await {
            warn!(code = %record.short_code, error = %e, "Cache write failed");
        }
    }

    /// Removes a cache entry.
    pub async fn invalidate(&self, code: &str) {
        if let Err(e) = self.timeouts.cache("delete", self.backend.delete(code)).await {
            warn!(code, error = %e, "Cache invalidation failed");
        }
    }
}
