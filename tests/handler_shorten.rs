mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use url_redirector::domain::repositories::UrlRepository;

#[tokio::test]
async fn test_shorten_success() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com/some/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["short_code"], "0000001");
    assert_eq!(body["short_url"], "http://sho.rt/0000001");
    assert_eq!(body["long_url"], "https://example.com/some/page");
    assert!(body["created_at"].is_string());
    assert!(body["expires_at"].is_null());
}

#[tokio::test]
async fn test_shorten_warms_cache() {
    let app = common::spawn_app();

    let code = app.shorten("https://example.com").await;

    assert_eq!(
        app.cache.peek(&code).await.as_deref(),
        Some("https://example.com")
    );
}

#[tokio::test]
async fn test_shorten_with_expiry() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/shorten")
        .json(&json!({
            "long_url": "https://example.com",
            "expires_at": "2099-12-31T23:59:59Z"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["expires_at"], "2099-12-31T23:59:59Z");
}

#[tokio::test]
async fn test_shorten_same_url_returns_same_code() {
    let app = common::spawn_app();

    let first = app.shorten("https://example.com/dedup").await;
    let second = app.shorten("https://example.com/dedup").await;

    assert_eq!(first, second);
    assert_eq!(app.store.url_count().await, 1);
}

#[tokio::test]
async fn test_shorten_distinct_urls_get_distinct_codes() {
    let app = common::spawn_app();

    let a = app.shorten("https://example.com/a").await;
    let b = app.shorten("https://example.com/b").await;

    assert_ne!(a, b);
    assert_eq!(b, "0000002");
}

#[tokio::test]
async fn test_shorten_rejects_unsupported_scheme() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "long_url": "ftp://example.com/file" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(body["error"]["details"]["long_url"].is_array());
    assert_eq!(app.store.url_count().await, 0);
}

#[tokio::test]
async fn test_shorten_rejects_oversized_url() {
    let app = common::spawn_app();
    let long_url = format!("https://example.com/{}", "x".repeat(2048));

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "long_url": long_url }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_accepts_url_at_length_limit() {
    let app = common::spawn_app();
    let prefix = "https://example.com/";
    let long_url = format!("{}{}", prefix, "x".repeat(2048 - prefix.len()));

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "long_url": long_url }))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_shorten_store_down_is_503() {
    let app = common::spawn_app();
    app.store.set_available(false);

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "upstream_unavailable");
}

#[tokio::test]
async fn test_shorten_survives_cache_outage() {
    let app = common::spawn_app();
    app.cache.set_available(false);

    let code = app.shorten("https://example.com").await;

    assert!(app.store.find_by_code(&code).await.unwrap().is_some());
}

#[tokio::test]
async fn test_shorten_expired_url_issues_new_code() {
    let app = common::spawn_app();
    app.store
        .seed(common::expired_record(3, "0000003", "https://example.com/old"))
        .await;

    let code = app.shorten("https://example.com/old").await;

    assert_ne!(code, "0000003");
    assert_eq!(app.shorten("https://example.com/old").await, code);

    let response = app.server.get(&format!("/{code}")).await;
    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/old");

    app.server
        .get("/0000003")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
