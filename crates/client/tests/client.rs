//! End-to-end tests: a real server on an ephemeral port, driven through
//! [`TodoClient`].

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use reqwest::StatusCode;
use todo_api::config::ServerConfig;
use todo_api::router::build_app_router;
use todo_api::state::AppState;
use todo_client::{ClientError, TodoClient};
use todo_core::field::Field;
use todo_core::filter::TodoFilter;
use todo_core::memory::MemoryStore;
use todo_core::todo::{Priority, TodoCreateOptions, TodoUpdateOptions};
use todo_core::types::TodoId;
use todo_core::Core;
use tracing_subscriber::filter::LevelFilter;

const TOKEN: &str = "t";

/// Serve the app over a fresh in-memory store and return its base URL.
async fn spawn_server() -> String {
    let config = ServerConfig {
        database_url: "postgres://unused".to_string(),
        auth_token: TOKEN.to_string(),
        addr: "127.0.0.1:0".to_string(),
        version: "e2e".to_string(),
        log_level: LevelFilter::INFO,
        request_timeout_secs: 15,
    };
    let app = build_app_router(AppState::new(
        Core::new(Arc::new(MemoryStore::new())),
        config,
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    format!("http://{addr}")
}

async fn client() -> TodoClient {
    TodoClient::new(spawn_server().await, TOKEN).unwrap()
}

#[tokio::test]
async fn test_create_then_get() {
    let client = client().await;

    let created = client
        .create_todo(&TodoCreateOptions::new("buy milk", Priority::Low))
        .await
        .unwrap();
    assert!(!created.completed);
    assert_eq!(created.time_created, created.time_updated);

    let fetched = client.get_todo(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_complete_a_todo() {
    let client = client().await;
    let created = client
        .create_todo(&TodoCreateOptions::new("buy milk", Priority::Low))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2)).await;

    let opts = TodoUpdateOptions {
        completed: Field::Present(true),
        ..Default::default()
    };
    let updated = client.update_todo(created.id, &opts).await.unwrap();

    assert!(updated.completed);
    assert_eq!(updated.text, "buy milk");
    assert_eq!(updated.priority, Priority::Low);
    assert!(updated.time_updated > updated.time_created);
}

#[tokio::test]
async fn test_list_with_filters() {
    let client = client().await;
    client
        .create_todo(&TodoCreateOptions::new("a", Priority::High))
        .await
        .unwrap();
    client
        .create_todo(&TodoCreateOptions::new("b", Priority::Low))
        .await
        .unwrap();

    let all = client.list_todos(&[]).await.unwrap();
    assert_eq!(all.len(), 2);

    let high = client
        .list_todos(&[TodoFilter::Priority(Priority::High)])
        .await
        .unwrap();
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].text, "a");

    let done = client
        .list_todos(&[TodoFilter::Completed(true)])
        .await
        .unwrap();
    assert!(done.is_empty());
}

#[tokio::test]
async fn test_missing_todo_is_404() {
    let client = client().await;

    let err = client.get_todo(TodoId::nil()).await.unwrap_err();
    assert_matches!(
        err,
        ClientError::Api { status: StatusCode::NOT_FOUND, ref message } if message == "todo not found"
    );
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let client = client().await;
    let created = client
        .create_todo(&TodoCreateOptions::new("gone", Priority::Medium))
        .await
        .unwrap();

    client.delete_todo(created.id).await.unwrap();
    client.delete_todo(created.id).await.unwrap();

    let err = client.get_todo(created.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_validation_error_message() {
    let client = client().await;

    let err = client
        .create_todo(&TodoCreateOptions::default())
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ClientError::Api { status: StatusCode::BAD_REQUEST, ref message }
            if message == "validate: missing required field text"
    );
}

#[tokio::test]
async fn test_wrong_token_is_unauthorized() {
    let client = TodoClient::new(spawn_server().await, "wrong").unwrap();

    let err = client.list_todos(&[]).await.unwrap_err();
    assert_matches!(
        err,
        ClientError::Api { status: StatusCode::UNAUTHORIZED, ref message } if message == "Unauthorized"
    );
}

#[tokio::test]
async fn test_version() {
    let client = client().await;

    assert_eq!(client.version().await.unwrap(), "e2e");
}
