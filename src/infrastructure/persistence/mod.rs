//! Durable store implementations.
//!
//! Concrete implementations of domain repository traits:
//!
//! - [`PgUrlRepository`] - URL records in PostgreSQL, two-phase insert
//!   inside one transaction
//! - [`PgClickRepository`] - Append-only click log in PostgreSQL
//! - [`InMemoryStore`] - Both repositories in process memory

pub mod memory_store;
pub mod pg_click_repository;
pub mod pg_url_repository;

pub use memory_store::InMemoryStore;
pub use pg_click_repository::PgClickRepository;
pub use pg_url_repository::PgUrlRepository;
