//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService, cache_key};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache for fast short code lookups.
///
/// `ConnectionManager` multiplexes one connection and reconnects on failure;
/// cloning it is cheap. Keys are `url:<short_code>` and expire via `SET EX`.
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let cache = Self { client: manager };
        cache.ping().await?;

        info!("Connected to Redis");
        Ok(cache)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, short_code: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        let cached = conn
            .get::<_, Option<String>>(cache_key(short_code))
            .await
            .map_err(|e| CacheError::OperationError(format!("GET {}: {}", short_code, e)))?;

        match &cached {
            Some(_) => debug!("Cache HIT: {}", short_code),
            None => debug!("Cache MISS: {}", short_code),
        }

        Ok(cached)
    }

    async fn set_with_ttl(
        &self,
        short_code: &str,
        long_url: &str,
        ttl: Duration,
    ) -> CacheResult<()> {
        let ttl_seconds = ttl.as_secs();
        if ttl_seconds == 0 {
            return Ok(());
        }

        let mut conn = self.client.clone();
        conn.set_ex::<_, _, ()>(cache_key(short_code), long_url, ttl_seconds)
            .await
            .map_err(|e| CacheError::OperationError(format!("SET {}: {}", short_code, e)))?;

        debug!("Cache SET: {} (TTL: {}s)", short_code, ttl_seconds);
        Ok(())
    }

    async fn delete(&self, short_code: &str) -> CacheResult<()> {
        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i32>(cache_key(short_code))
            .await
            .map_err(|e| CacheError::OperationError(format!("DEL {}: {}", short_code, e)))?;

        if deleted > 0 {
            debug!("Cache INVALIDATE: {}", short_code);
        }
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.client.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
