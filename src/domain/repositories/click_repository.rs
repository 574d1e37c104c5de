//! Repository trait for the append-only click log.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage for click events.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryStore`] - process-local store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click event.
    async fn insert_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Lists clicks for a code, newest first.
    async fn list_by_code(
        &self,
        code: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Click>, AppError>;

    /// Counts all clicks ever recorded for a code.
    async fn count_by_code(&self, code: &str) -> Result<i64, AppError>;
}
