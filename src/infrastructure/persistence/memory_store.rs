//! In-memory implementation of both store repositories.
//!
//! Mirrors the PostgreSQL contracts closely enough for the services and the
//! HTTP layer to be exercised without a database: identifiers are allocated
//! monotonically and never reused, pending inserts stay invisible until
//! finalized, and clicks outlive deleted records.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::entities::{Click, NewClick, NewUrlRecord, UrlRecord};
use crate::domain::repositories::{ClickRepository, PendingUrl, UrlRepository};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    urls: BTreeMap<i64, UrlRecord>,
    clicks: Vec<Click>,
}

struct Inner {
    tables: Mutex<Tables>,
    next_url_id: AtomicI64,
    next_click_id: AtomicI64,
    available: AtomicBool,
    latency_ms: AtomicU64,
    code_lookups: AtomicUsize,
}

/// Process-local store implementing [`UrlRepository`] and [`ClickRepository`].
///
/// Cloning shares the underlying tables.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                tables: Mutex::new(Tables::default()),
                next_url_id: AtomicI64::new(1),
                next_click_id: AtomicI64::new(1),
                available: AtomicBool::new(true),
                latency_ms: AtomicU64::new(0),
                code_lookups: AtomicUsize::new(0),
            }),
        }
    }

    /// Makes every subsequent operation fail with `UpstreamUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    /// Delays every subsequent operation.
    pub fn set_latency(&self, latency: Duration) {
        self.inner
            .latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// Number of `find_by_code` calls served so far.
    pub fn code_lookups(&self) -> usize {
        self.inner.code_lookups.load(Ordering::SeqCst)
    }

    /// Stores a fully formed record as-is, bypassing the pending insert.
    ///
    /// Lets tests seed records that are already expired.
    pub async fn seed(&self, record: UrlRecord) {
        self.inner
            .next_url_id
            .fetch_max(record.id + 1, Ordering::SeqCst);
        self.inner.tables.lock().await.urls.insert(record.id, record);
    }

    /// Number of committed URL records.
    pub async fn url_count(&self) -> usize {
        self.inner.tables.lock().await.urls.len()
    }

    async fn enter(&self) -> Result<(), AppError> {
        let latency = self.inner.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        if self.inner.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::upstream_unavailable(
                "Store unavailable",
                json!({ "backend": "memory" }),
            ))
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryStore {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlRecord>, AppError> {
        self.enter().await?;

        let tables = self.inner.tables.lock().await;
        Ok(tables
            .urls
            .values()
            .rev()
            .find(|record| record.long_url == long_url)
            .cloned())
    }

    async fn insert_pending(&self, new_url: NewUrlRecord) -> Result<Box<dyn PendingUrl>, AppError> {
        self.enter().await?;

        let id = self.inner.next_url_id.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryPendingUrl {
            store: self.clone(),
            id,
            new_url,
        }))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        self.inner.code_lookups.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;

        let tables = self.inner.tables.lock().await;
        Ok(tables
            .urls
            .values()
            .find(|record| record.short_code == code)
            .cloned())
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        self.enter().await?;

        let mut tables = self.inner.tables.lock().await;
        match tables.urls.values_mut().find(|record| record.short_code == code) {
            Some(record) => {
                record.click_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        self.enter().await?;

        let mut tables = self.inner.tables.lock().await;
        let before = tables.urls.len();
        tables.urls.retain(|_, record| record.short_code != code);
        Ok(tables.urls.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.enter().await
    }
}

#[async_trait]
impl ClickRepository for InMemoryStore {
    async fn insert_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        self.enter().await?;

        let click = Click {
            id: self.inner.next_click_id.fetch_add(1, Ordering::SeqCst),
            short_code: new_click.short_code,
            clicked_at: new_click.clicked_at,
            user_agent: new_click.user_agent,
            ip_address: new_click.ip_address,
        };
        self.inner.tables.lock().await.clicks.push(click.clone());
        Ok(click)
    }

    async fn list_by_code(
        &self,
        code: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Click>, AppError> {
        self.enter().await?;

        let tables = self.inner.tables.lock().await;
        let mut matching: Vec<Click> = tables
            .clicks
            .iter()
            .filter(|click| click.short_code == code)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.clicked_at.cmp(&a.clicked_at).then(b.id.cmp(&a.id)));

        Ok(matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_by_code(&self, code: &str) -> Result<i64, AppError> {
        self.enter().await?;

        let tables = self.inner.tables.lock().await;
        Ok(tables
            .clicks
            .iter()
            .filter(|click| click.short_code == code)
            .count() as i64)
    }
}

/// Reserved identifier whose record is only stored on finalize.
struct MemoryPendingUrl {
    store: InMemoryStore,
    id: i64,
    new_url: NewUrlRecord,
}

#[async_trait]
impl PendingUrl for MemoryPendingUrl {
    fn id(&self) -> i64 {
        self.id
    }

    async fn finalize_code(self: Box<Self>, code: &str) -> Result<UrlRecord, AppError> {
        self.store.enter().await?;

        let record = UrlRecord {
            id: self.id,
            short_code: code.to_string(),
            long_url: self.new_url.long_url,
            created_at: Utc::now(),
            expires_at: self.new_url.expires_at,
            click_count: 0,
        };

        let mut tables = self.store.inner.tables.lock().await;
        if tables.urls.values().any(|existing| existing.short_code == code) {
            return Err(AppError::internal(
                "Short code already assigned",
                json!({ "code": code }),
            ));
        }
        tables.urls.insert(record.id, record.clone());

        Ok(record)
    }
}
