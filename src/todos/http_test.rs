use super::*;
use std::collections::HashMap;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;

fn timeouts() -> HttpTimeouts {
    HttpTimeouts { request_secs: 5, connect_secs: 2 }
}

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/todos")
}

async fn echo_todos(Query(params): Query<HashMap<String, String>>) -> axum::Json<serde_json::Value> {
    let user_id: i64 = params.get("userId").and_then(|v| v.parse().ok()).unwrap_or(-1);
    axum::Json(serde_json::json!([
        { "userId": user_id, "id": 1, "title": "a very very long todo title here", "complete": false },
        { "userId": user_id, "id": 2, "title": "short", "completed": true }
    ]))
}

// =========================================================================
// parse_todos
// =========================================================================

#[test]
fn parse_empty_array() {
    assert!(parse_todos("[]").unwrap().is_empty());
}

#[test]
fn parse_rejects_object() {
    assert!(parse_todos(r#"{"error": "nope"}"#).is_err());
}

#[test]
fn todos_url_appends_user_query() {
    let source = HttpTodoSource::new("http://example.test/todos", timeouts()).unwrap();
    assert_eq!(source.todos_url(7), "http://example.test/todos?userId=7");
    assert_eq!(source.base_url(), "http://example.test/todos");
}

#[test]
fn from_config_uses_configured_base_url() {
    let config = TodoConfig { base_url: "http://example.test/api".into(), ..TodoConfig::default() };
    let source = HttpTodoSource::from_config(&config).unwrap();
    assert_eq!(source.todos_url(1), "http://example.test/api?userId=1");
}

// =========================================================================
// fetch_todos against a stub server
// =========================================================================

#[tokio::test]
async fn fetch_returns_items_untruncated() {
    let base = spawn_stub(Router::new().route("/todos", get(echo_todos))).await;
    let source = HttpTodoSource::new(base, timeouts()).unwrap();

    let items = source.fetch_todos(3).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|t| t.owner_id == 3));
    assert_eq!(items[0].title, "a very very long todo title here");
    assert!(!items[0].complete);
    assert!(items[1].complete);
}

#[tokio::test]
async fn fetch_maps_error_status_to_backend_fault() {
    let base = spawn_stub(Router::new().route(
        "/todos",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;
    let source = HttpTodoSource::new(base.clone(), timeouts()).unwrap();

    let err = source.fetch_todos(2).await.unwrap_err();
    assert_eq!(
        err,
        FetchError::Backend {
            status: 500,
            message: format!("Http failure response for {base}?userId=2: 500 Internal Server Error"),
        }
    );
    assert!(err.to_string().starts_with("Backend returned code 500: "));
}

#[tokio::test]
async fn fetch_maps_missing_route_to_backend_fault() {
    let base = spawn_stub(Router::new()).await;
    let source = HttpTodoSource::new(base, timeouts()).unwrap();

    let err = source.fetch_todos(1).await.unwrap_err();
    assert!(matches!(err, FetchError::Backend { status: 404, .. }));
}

#[tokio::test]
async fn fetch_maps_undecodable_body_to_backend_fault() {
    let base = spawn_stub(Router::new().route("/todos", get(|| async { "not json" }))).await;
    let source = HttpTodoSource::new(base.clone(), timeouts()).unwrap();

    let err = source.fetch_todos(4).await.unwrap_err();
    assert_eq!(
        err,
        FetchError::Backend { status: 200, message: format!("Http failure during parsing for {base}?userId=4") }
    );
}

#[tokio::test]
async fn fetch_maps_refused_connection_to_transport_fault() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let source = HttpTodoSource::new(format!("http://{addr}/todos"), timeouts()).unwrap();

    let err = source.fetch_todos(1).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
    assert!(err.to_string().starts_with("An error occurred: "));
}
