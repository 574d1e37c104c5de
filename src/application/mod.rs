//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository and
//! cache calls under per-call deadlines. Services consume repository traits
//! and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short URL creation and deletion
//! - [`services::redirect_service::RedirectService`] - Cache-first resolution and click capture
//! - [`services::stats_service::StatsService`] - Click counters and the click log

pub mod services;
