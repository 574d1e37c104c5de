mod common;

use axum::http::StatusCode;
use url_redirector::domain::entities::NewClick;
use url_redirector::domain::repositories::ClickRepository;

#[tokio::test]
async fn test_delete_link_success() {
    let app = common::spawn_app();
    let code = app.shorten("https://example.com").await;

    let response = app.server.delete(&format!("/{code}")).await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(app.cache.peek(&code).await.is_none());

    app.server
        .get(&format!("/{code}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_link_not_found() {
    let app = common::spawn_app();

    app.server
        .delete("/0000404")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let app = common::spawn_app();
    let code = app.shorten("https://example.com").await;

    app.server
        .delete(&format!("/{code}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .delete(&format!("/{code}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_keeps_click_history() {
    let app = common::spawn_app();
    let code = app.shorten("https://example.com").await;
    app.store
        .insert_click(NewClick {
            short_code: code.clone(),
            clicked_at: chrono::Utc::now(),
            user_agent: None,
            ip_address: None,
        })
        .await
        .unwrap();

    app.server.delete(&format!("/{code}")).await;

    assert_eq!(app.store.count_by_code(&code).await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_after_delete_gets_new_code() {
    let app = common::spawn_app();
    let first = app.shorten("https://example.com").await;
    app.server.delete(&format!("/{first}")).await;

    let second = app.shorten("https://example.com").await;

    assert_ne!(first, second);
}
