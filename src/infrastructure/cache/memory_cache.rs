//! Process-local cache with per-entry expiry.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

struct Entry {
    long_url: String,
    expires_at: Instant,
}

/// In-memory cache keyed by short code.
///
/// Expiry uses `tokio::time::Instant`, so tests can drive it with a paused
/// clock. Expired entries are removed lazily on read. The availability
/// and latency switches let tests simulate an unreachable or slow backend.
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
    available: AtomicBool,
    latency: AtomicU64,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            latency: AtomicU64::new(0),
        }
    }

    /// Makes every subsequent operation fail (or succeed again).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Delays every subsequent operation, to simulate a slow backend.
    pub fn set_latency(&self, latency: Duration) {
        self.latency.store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// Reads an entry without going through availability checks.
    pub async fn peek(&self, short_code: &str) -> Option<String> {
        let entries = self.entries.lock().await;
        entries
            .get(short_code)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.long_url.clone())
    }

    /// Remaining lifetime of an entry, if present and unexpired.
    pub async fn ttl(&self, short_code: &str) -> Option<Duration> {
        let entries = self.entries.lock().await;
        entries
            .get(short_code)
            .and_then(|entry| entry.expires_at.checked_duration_since(Instant::now()))
            .filter(|remaining| !remaining.is_zero())
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn ensure_available(&self) -> CacheResult<()> {
        let latency = self.latency.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CacheError::ConnectionError("in-memory cache marked unavailable".into()))
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get(&self, short_code: &str) -> CacheResult<Option<String>> {
        self.ensure_available().await?;

        let mut entries = self.entries.lock().await;
        match entries.get(short_code) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.long_url.clone())),
            Some(_) => {
                entries.remove(short_code);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_with_ttl(
        &self,
        short_code: &str,
        long_url: &str,
        ttl: Duration,
    ) -> CacheResult<()> {
        self.ensure_available().await?;
        if ttl.is_zero() {
            return Ok(());
        }

        self.entries.lock().await.insert(
            short_code.to_string(),
            Entry {
                long_url: long_url.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, short_code: &str) -> CacheResult<()> {
        self.ensure_available().await?;
        self.entries.lock().await.remove(short_code);
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        self.ensure_available().await
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
