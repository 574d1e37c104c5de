//! Repository trait definitions for the durable store.
//!
//! The services depend only on these traits and on two contracts:
//!
//! - identifiers handed out by [`UrlRepository::insert_pending`] are fresh,
//!   monotonically increasing, and never reused;
//! - a [`PendingUrl`] is invisible to other readers until
//!   [`PendingUrl::finalize_code`] commits it, and dropping it rolls back.
//!
//! Implementations live in `crate::infrastructure::persistence`. Mock
//! implementations are generated via `mockall` for unit tests.

pub mod click_repository;
pub mod url_repository;

pub use click_repository::ClickRepository;
pub use url_repository::{PendingUrl, UrlRepository};

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
