//! PostgreSQL implementation of the click log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    short_code: String,
    clicked_at: DateTime<Utc>,
    user_agent: Option<String>,
    ip_address: Option<String>,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click {
            id: row.id,
            short_code: row.short_code,
            clicked_at: row.clicked_at,
            user_agent: row.user_agent,
            ip_address: row.ip_address,
        }
    }
}

/// PostgreSQL repository for click events.
///
/// The table is append-only; rows reference short codes by value so they
/// survive deletion of the URL record.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks (short_code, clicked_at, user_agent, ip_address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, short_code, clicked_at, user_agent, ip_address
            "#,
        )
        .bind(&new_click.short_code)
        .bind(new_click.clicked_at)
        .bind(&new_click.user_agent)
        .bind(&new_click.ip_address)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_by_code(
        &self,
        code: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Click>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, short_code, clicked_at, user_agent, ip_address
            FROM clicks
            WHERE short_code = $1
            ORDER BY clicked_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(code)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }

    async fn count_by_code(&self, code: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE short_code = $1")
            .bind(code)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
