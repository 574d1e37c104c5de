//! URL record entity.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// A shortened URL.
///
/// `short_code` is always `base62::encode(id)`; records are only ever
/// observed after the code has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
}

impl UrlRecord {
    /// Returns true once `expires_at` is strictly in the past relative to `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    /// TTL to use when caching this record.
    ///
    /// The default TTL is clamped to the time left before expiry, so a cache
    /// entry never outlives the record's lifetime. Returns `None` when less
    /// than one whole second remains; such records are not cached at all.
    pub fn cache_ttl(&self, default_ttl: Duration, now: DateTime<Utc>) -> Option<Duration> {
        let ttl = match self.expires_at {
            None => default_ttl,
            Some(expires_at) => {
                let remaining = (expires_at - now).to_std().ok()?;
                default_ttl.min(remaining)
            }
        };

        let whole_seconds = Duration::from_secs(ttl.as_secs());
        (!whole_seconds.is_zero()).then_some(whole_seconds)
    }
}

/// Input for inserting a new URL record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub long_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}
