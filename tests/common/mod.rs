#![allow(dead_code)]

use axum::extract::connect_info::MockConnectInfo;
use axum_test::TestServer;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use url_redirector::application::services::Timeouts;
use url_redirector::domain::click_event::ClickEvent;
use url_redirector::domain::click_worker::run_click_worker;
use url_redirector::domain::entities::UrlRecord;
use url_redirector::infrastructure::cache::InMemoryCache;
use url_redirector::infrastructure::persistence::InMemoryStore;
use url_redirector::routes::router;
use url_redirector::state::{AppState, StateConfig};

pub const BASE_URL: &str = "http://sho.rt";
pub const PEER: ([u8; 4], u16) = ([10, 0, 0, 7], 51000);

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryStore>,
    pub cache: Arc<InMemoryCache>,
    /// `None` when a click worker consumes the queue.
    pub clicks: Option<mpsc::Receiver<ClickEvent>>,
}

pub fn create_test_state(
    store: Arc<InMemoryStore>,
    cache: Arc<InMemoryCache>,
    behind_proxy: bool,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        store.clone(),
        store,
        cache,
        tx,
        StateConfig {
            base_url: BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(3600),
            timeouts: Timeouts::default(),
            behind_proxy,
        },
    );

    (state, rx)
}

fn build(behind_proxy: bool) -> (TestServer, Arc<InMemoryStore>, Arc<InMemoryCache>, mpsc::Receiver<ClickEvent>) {
    let store = Arc::new(InMemoryStore::new());
    let cache = Arc::new(InMemoryCache::new());
    let (state, rx) = create_test_state(store.clone(), cache.clone(), behind_proxy);

    let app = router(state).layer(MockConnectInfo(SocketAddr::from(PEER)));
    let server = TestServer::new(app).unwrap();

    (server, store, cache, rx)
}

/// App whose click events stay in the queue for inspection.
pub fn spawn_app() -> TestApp {
    spawn_app_with(false)
}

pub fn spawn_app_with(behind_proxy: bool) -> TestApp {
    let (server, store, cache, rx) = build(behind_proxy);
    TestApp {
        server,
        store,
        cache,
        clicks: Some(rx),
    }
}

/// App with a running click worker persisting into the same store.
pub fn spawn_app_with_worker() -> TestApp {
    let (server, store, cache, rx) = build(false);
    tokio::spawn(run_click_worker(
        rx,
        store.clone(),
        store.clone(),
        2,
        Timeouts::default(),
    ));

    TestApp {
        server,
        store,
        cache,
        clicks: None,
    }
}

impl TestApp {
    /// Shortens a URL through the API and returns its code.
    pub async fn shorten(&self, long_url: &str) -> String {
        let response = self
            .server
            .post("/shorten")
            .json(&serde_json::json!({ "long_url": long_url }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        response.json::<serde_json::Value>()["short_code"]
            .as_str()
            .unwrap()
            .to_string()
    }

    pub fn drain_clicks(&mut self) -> Vec<ClickEvent> {
        let rx = self.clicks.as_mut().expect("click queue is owned by a worker");
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }
}

pub fn expired_record(id: i64, code: &str, long_url: &str) -> UrlRecord {
    let now = chrono::Utc::now();
    UrlRecord {
        id,
        short_code: code.to_string(),
        long_url: long_url.to_string(),
        created_at: now - chrono::Duration::days(2),
        expires_at: Some(now - chrono::Duration::hours(1)),
        click_count: 0,
    }
}

/// Polls until `check` holds or a second has passed.
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
