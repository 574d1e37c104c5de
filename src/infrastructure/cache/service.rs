//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;

/// Namespace prefix shared by every cache key (`url:<short_code>`).
pub const KEY_PREFIX: &str = "url:";

/// Builds the cache key for a short code.
pub fn cache_key(short_code: &str) -> String {
    format!("{KEY_PREFIX}{short_code}")
}

/// Errors that can occur during cache operations.
///
/// Never surfaced to clients: callers log them and fall back to the store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),

    #[error("Cache operation timed out: {0}")]
    Timeout(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A TTL-expiring key/value cache of short code → long URL.
///
/// Implementations report failures as [`CacheError`] instead of hiding them;
/// the services decide how to degrade.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis with `SET EX`
/// - [`crate::infrastructure::cache::InMemoryCache`] - process-local TTL map
/// - [`crate::infrastructure::cache::NullCache`] - caching disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached long URL, or `Ok(None)` on a miss.
    async fn get(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping that expires after `ttl`.
    async fn set_with_ttl(&self, short_code: &str, long_url: &str, ttl: Duration)
    -> CacheResult<()>;

    /// Removes a mapping. Removing a missing key is not an error.
    async fn delete(&self, short_code: &str) -> CacheResult<()>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> CacheResult<()>;

    /// Short backend name used in health reports.
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_prefixed() {
        assert_eq!(cache_key("0000001"), "url:0000001");
    }
}
