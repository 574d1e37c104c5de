//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{PendingUrl, UrlRepository};
use crate::error::AppError;

const URL_COLUMNS: &str = "id, short_code, long_url, created_at, expires_at, click_count";

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    short_code: String,
    long_url: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    click_count: i64,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord {
            id: row.id,
            short_code: row.short_code,
            long_url: row.long_url,
            created_at: row.created_at,
            expires_at: row.expires_at,
            click_count: row.click_count,
        }
    }
}

/// PostgreSQL repository for URL records.
///
/// Uses SQLx prepared statements for SQL injection protection. Rows whose
/// `short_code` is still NULL belong to an uncommitted transaction and are
/// never returned.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(&format!(
            "SELECT {URL_COLUMNS} FROM urls \
             WHERE long_url = $1 AND short_code IS NOT NULL \
             ORDER BY id DESC LIMIT 1"
        ))
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn insert_pending(&self, new_url: NewUrlRecord) -> Result<Box<dyn PendingUrl>, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO urls (long_url, expires_at) VALUES ($1, $2) RETURNING id",
        )
        .bind(&new_url.long_url)
        .bind(new_url.expires_at)
        .fetch_one(&mut *tx)
        .await?;

        Ok(Box::new(PgPendingUrl { tx, id }))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(&format!(
            "SELECT {URL_COLUMNS} FROM urls WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE urls SET click_count = click_count + 1 WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}

/// A row inserted inside an open transaction, waiting for its short code.
///
/// Dropping the handle drops the transaction, which rolls the insert back.
struct PgPendingUrl {
    tx: Transaction<'static, Postgres>,
    id: i64,
}

#[async_trait]
impl PendingUrl for PgPendingUrl {
    fn id(&self) -> i64 {
        self.id
    }

    async fn finalize_code(self: Box<Self>, code: &str) -> Result<UrlRecord, AppError> {
        let PgPendingUrl { mut tx, id } = *self;

        let row = sqlx::query_as::<_, UrlRow>(&format!(
            "UPDATE urls SET short_code = $1 WHERE id = $2 RETURNING {URL_COLUMNS}"
        ))
        .bind(code)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_row_converts_to_record() {
        let now = Utc::now();
        let record = UrlRecord::from(UrlRow {
            id: 42,
            short_code: "000000G".to_string(),
            long_url: "https://example.com".to_string(),
            created_at: now,
            expires_at: Some(now + Duration::days(1)),
            click_count: 7,
        });

        assert_eq!(record.id, 42);
        assert_eq!(record.short_code, "000000G");
        assert_eq!(record.click_count, 7);
        assert!(record.expires_at.is_some());
    }
}
