//! Shared application state injected into every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{
    LinkService, RedirectService, ResilientCache, StatsService, Timeouts,
};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{ClickRepository, UrlRepository};
use crate::infrastructure::cache::CacheService;

/// Services and adapters shared across requests.
///
/// Cloning is cheap: every field is an `Arc`, a channel sender, or `Copy`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub stats_service: Arc<StatsService>,
    pub urls: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub timeouts: Timeouts,
    pub behind_proxy: bool,
}

/// Inputs for [`AppState::new`].
pub struct StateConfig {
    pub base_url: String,
    pub cache_ttl: std::time::Duration,
    pub timeouts: Timeouts,
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services over the given adapters.
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        clicks: Arc<dyn ClickRepository>,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
        config: StateConfig,
    ) -> Self {
        let resilient = ResilientCache::new(cache.clone(), config.cache_ttl, config.timeouts);

        Self {
            link_service: Arc::new(LinkService::new(
                urls.clone(),
                resilient.clone(),
                config.timeouts,
                config.base_url,
            )),
            redirect_service: Arc::new(RedirectService::new(
                urls.clone(),
                resilient,
                config.timeouts,
                click_sender.clone(),
            )),
            stats_service: Arc::new(StatsService::new(urls.clone(), clicks, config.timeouts)),
            urls,
            cache,
            click_sender,
            timeouts: config.timeouts,
            behind_proxy: config.behind_proxy,
        }
    }
}
