//! Repository trait for URL records.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage for URL records.
///
/// Every method may be called concurrently from many in-flight requests.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryStore`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds the newest record whose long URL matches exactly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UpstreamUnavailable`] when the store cannot be reached.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Inserts a record without a short code and returns a handle holding
    /// its freshly allocated identifier.
    ///
    /// Nothing is visible to other readers until the handle is finalized.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UpstreamUnavailable`] when the store cannot be reached.
    async fn insert_pending(&self, new_url: NewUrlRecord) -> Result<Box<dyn PendingUrl>, AppError>;

    /// Finds a record by its short code.
    ///
    /// Expired records are returned; expiry is enforced by the caller.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Atomically adds one to the click counter.
    ///
    /// Returns `Ok(false)` when no record has this code.
    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError>;

    /// Deletes the record with this code. Click history is kept.
    ///
    /// Returns `Ok(false)` when no record has this code.
    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Round-trips to the store.
    async fn ping(&self) -> Result<(), AppError>;
}

/// A record inserted by [`UrlRepository::insert_pending`] that still lacks
/// its short code.
///
/// The handle owns the underlying transaction (or reservation). Dropping it
/// without calling [`PendingUrl::finalize_code`] discards the row on every
/// exit path, including errors and cancelled futures.
#[async_trait]
pub trait PendingUrl: Send {
    /// Identifier allocated by the store.
    fn id(&self) -> i64;

    /// Writes the short code and commits, making the record visible.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UpstreamUnavailable`] if the commit fails; the row
    /// is then discarded.
    async fn finalize_code(self: Box<Self>, code: &str) -> Result<UrlRecord, AppError>;
}
