//! Deadlines for store and cache calls.

use serde_json::json;
use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

use crate::error::AppError;
use crate::infrastructure::cache::{CacheError, CacheResult};

/// Default deadline for a single cache call.
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_millis(100);

/// Default deadline for a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Per-call deadlines.
///
/// The cache deadline is kept well below the store deadline so that a slow
/// cache costs less than the fallback it guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub cache: Duration,
    pub store: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            cache: DEFAULT_CACHE_TIMEOUT,
            store: DEFAULT_STORE_TIMEOUT,
        }
    }
}

impl Timeouts {
    pub fn new(cache: Duration, store: Duration) -> Self {
        Self { cache, store }
    }

    /// Runs a store call, turning an elapsed deadline into
    /// [`AppError::UpstreamUnavailable`].
    ///
    /// The future is dropped on timeout, which releases anything it holds
    /// (including an open transaction).
    pub async fn store<T, F>(&self, operation: &'static str, call: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.store, call).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    operation,
                    timeout_ms = self.store.as_millis() as u64,
                    "Store call timed out"
                );
                Err(AppError::upstream_unavailable(
                    "Store timed out",
                    json!({ "operation": operation }),
                ))
            }
        }
    }

    /// Runs a cache call, turning an elapsed deadline into [`CacheError::Timeout`].
    pub async fn cache<T, F>(&self, operation: &'static str, call: F) -> CacheResult<T>
    where
        F: Future<Output = CacheResult<T>>,
    {
        match tokio::time::timeout(self.cache, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.cache.as_millis() as u64,
                    "Cache call timed out"
                );
                Err(CacheError::Timeout(operation.to_string()))
            }
        }
    }
}
