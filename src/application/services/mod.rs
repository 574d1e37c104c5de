//! Business logic services for the application layer.

pub mod link_service;
pub mod redirect_service;
pub mod resilient_cache;
pub mod stats_service;
pub mod timeouts;

pub use link_service::LinkService;
pub use redirect_service::RedirectService;
pub use resilient_cache::ResilientCache;
pub use stats_service::{ClickPage, StatsService};
pub use timeouts::Timeouts;
