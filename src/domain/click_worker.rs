//! Background worker that persists click events.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::application::services::Timeouts;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{ClickRepository, UrlRepository};

/// Attempts per store write, first try included.
const MAX_ATTEMPTS: usize = 3;

/// Delays between attempts: ~50ms, then ~100ms.
fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(25)
        .map(jitter)
        .take(MAX_ATTEMPTS - 1)
}

/// Consumes click events until every sender is dropped.
///
/// Each event appends a row to the click log and bumps the record's counter.
/// The two writes are independent and retried separately, so a click may be
/// counted twice after a retry but never blocks a redirect. Up to
/// `concurrency` events are persisted at once; on shutdown the worker waits
/// for in-flight events before returning. Every attempt is bounded by the
/// store deadline, so a hung store cannot pin a permit.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    urls: Arc<dyn UrlRepository>,
    clicks: Arc<dyn ClickRepository>,
    concurrency: usize,
    timeouts: Timeouts,
) {
    let permits = concurrency.max(1);
    let limiter = Arc::new(Semaphore::new(permits));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = limiter.clone().acquire_owned().await else {
            break;
        };

        let urls = urls.clone();
        let clicks = clicks.clone();
        tokio::spawn(async move {
            persist_click(&event, urls.as_ref(), clicks.as_ref(), timeouts).await;
            drop(permit);
        });
    }

    let _drained = limiter.acquire_many(permits as u32).await;
    info!("Click worker stopped");
}

async fn persist_click(
    event: &ClickEvent,
    urls: &dyn UrlRepository,
    clicks: &dyn ClickRepository,
    timeouts: Timeouts,
) {
    let new_click = event.to_new_click();

    let insert = || timeouts.store("insert_click", clicks.insert_click(new_click.clone()));
    match Retry::spawn(retry_strategy(), insert).await {
        Ok(click) => {
            counter!("clicks_recorded_total").increment(1);
            debug!(code = %event.code, click_id = click.id, "Click recorded");
        }
        Err(e) => {
            counter!("clicks_failed_total").increment(1);
            warn!(code = %event.code, error = %e, "Dropping click event after retries");
        }
    }

    let increment = || timeouts.store("increment_clicks", urls.increment_clicks(&event.code));
    match Retry::spawn(retry_strategy(), increment).await {
        Ok(true) => {}
        Ok(false) => debug!(code = %event.code, "Record gone before its click was counted"),
        Err(e) => warn!(code = %event.code, error = %e, "Failed to increment click counter"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::click_event::ClientInfo;
    use crate::domain::entities::Click;
    use crate::domain::repositories::{MockClickRepository, MockUrlRepository};
    use crate::error::AppError;
    use crate::infrastructure::persistence::InMemoryStore;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn click_for(code: &str) -> Click {
        Click {
            id: 1,
            short_code: code.to_string(),
            clicked_at: chrono::Utc::now(),
            user_agent: None,
            ip_address: None,
        }
    }

    async fn run_with(events: Vec<ClickEvent>, urls: MockUrlRepository, clicks: MockClickRepository) {
        let (tx, rx) = mpsc::channel(16);
        for event in events {
            tx.send(event).await.unwrap();
        }
        drop(tx);

        run_click_worker(rx, Arc::new(urls), Arc::new(clicks), 2, Timeouts::default()).await;
    }

    #[tokio::test]
    async fn test_worker_records_click_and_increments_counter() {
        let mut urls = MockUrlRepository::new();
        let mut clicks = MockClickRepository::new();

        clicks
            .expect_insert_click()
            .withf(|c| c.short_code == "0000001" && c.user_agent.as_deref() == Some("curl/8.0"))
            .times(1)
            .returning(|c| Ok(click_for(&c.short_code)));
        urls.expect_increment_clicks()
            .withf(|code| code == "0000001")
            .times(1)
            .returning(|_| Ok(true));

        let event = ClickEvent::new("0000001", ClientInfo::new(Some("curl/8.0"), None));
        run_with(vec![event], urls, clicks).await;
    }

    #[tokio::test]
    async fn test_worker_drains_every_event_before_stopping() {
        let mut urls = MockUrlRepository::new();
        let mut clicks = MockClickRepository::new();

        clicks
            .expect_insert_click()
            .times(5)
            .returning(|c| Ok(click_for(&c.short_code)));
        urls.expect_increment_clicks().times(5).returning(|_| Ok(true));

        let events = (0..5)
            .map(|_| ClickEvent::new("0000002", ClientInfo::default()))
            .collect();
        run_with(events, urls, clicks).await;
    }

    #[tokio::test]
    async fn test_worker_retries_failed_insert() {
        let mut urls = MockUrlRepository::new();
        let mut clicks = MockClickRepository::new();

        let attempts = AtomicUsize::new(0);
        clicks.expect_insert_click().times(2).returning(move |c| {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::upstream_unavailable("Store unavailable", json!({})))
            } else {
                Ok(click_for(&c.short_code))
            }
        });
        urls.expect_increment_clicks().times(1).returning(|_| Ok(true));

        run_with(
            vec![ClickEvent::new("0000003", ClientInfo::default())],
            urls,
            clicks,
        )
        .await;
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_max_attempts() {
        let mut urls = MockUrlRepository::new();
        let mut clicks = MockClickRepository::new();

        clicks
            .expect_insert_click()
            .times(MAX_ATTEMPTS)
            .returning(|_| Err(AppError::upstream_unavailable("Store unavailable", json!({}))));
        urls.expect_increment_clicks().times(1).returning(|_| Ok(false));

        run_with(
            vec![ClickEvent::new("0000004", ClientInfo::default())],
            urls,
            clicks,
        )
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_finishes_when_store_hangs() {
        let store = Arc::new(InMemoryStore::new());
        store.set_latency(Duration::from_secs(3600));

        let (tx, rx) = mpsc::channel(4);
        tx.send(ClickEvent::new("0000005", ClientInfo::default()))
            .await
            .unwrap();
        drop(tx);

        let worker = run_click_worker(rx, store.clone(), store.clone(), 1, Timeouts::default());
        let finished = tokio::time::timeout(Duration::from_secs(60), worker).await;

        assert!(finished.is_ok());
    }
}
