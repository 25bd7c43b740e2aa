//! Tests for the backend client against a local server.

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use futures::StreamExt;
use panelwright_client::{AgentClient, reconcile_events};
use panelwright_config::ClientSettings;
use panelwright_core::RunAgentRequest;
use panelwright_error::{ClientErrorKind, PanelwrightErrorKind};
use serde_json::{Map, Value, json};

async fn create_session(Path((app, user, session)): Path<(String, String, String)>) -> impl IntoResponse {
    if session == "taken" {
        return (StatusCode::CONFLICT, Json(json!({"error": "Session already exists"})));
    }
    (
        StatusCode::OK,
        Json(json!({"id": session, "appName": app, "userId": user, "state": {}})),
    )
}

async fn run(Json(request): Json<RunAgentRequest>) -> impl IntoResponse {
    if request.session_id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "Session not found"})));
    }
    (
        StatusCode::OK,
        Json(json!([
            {"author": "comic_requirements_agent", "content": {"parts": [{"text": format!("echo: {}", request.new_message.text())}]}},
            {"author": "script_generator", "actions": {"stateDelta": {"comic_script": {"title": "T", "panels": [{"panelId": 1, "scene": "s", "narration": "n"}]}}}}
        ])),
    )
}

async fn run_sse() -> impl IntoResponse {
    let body = concat!(
        "data: {\"author\": \"script_generator\", \"actions\": {\"stateDelta\": {\"comic_script\": {\"title\": \"Streamed\", \"panels\": [{\"panelId\": 1, \"scene\": \"s\"}]}}}}\n\n",
        "data: not-json\n\n",
        "data: {\"author\": \"image_generator\", \"content\": {\"parts\": [{\"functionResponse\": {\"name\": \"generate_comic_image\", \"response\": {\"success\": true, \"panelId\": 1, \"imageUrl\": \"https://img/1.png\"}}}]}}\n\n",
    );
    ([("content-type", "text/event-stream")], body)
}

async fn serve() -> String {
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/apps/{app}/users/{user}/sessions/{session}", post(create_session))
        .route("/run", post(run))
        .route("/run_sse", post(run_sse));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> AgentClient {
    let settings = ClientSettings {
        backend_url: format!("{}/", base_url),
        timeout_secs: 30,
    };
    AgentClient::new(&settings, "agent").unwrap()
}

#[tokio::test]
async fn test_create_session_and_conflict() {
    let base = serve().await;
    let client = client(&base);
    assert_eq!(client.base_url(), base);

    let created = client
        .create_session("user_1", "session_1", Map::new())
        .await
        .unwrap();
    assert!(!created.exists);
    assert_eq!(created.session_id, "session_1");

    let existing = client
        .create_session("user_1", "taken", Map::new())
        .await
        .unwrap();
    assert!(existing.exists);
    assert_eq!(existing.session_id, "taken");
}

#[tokio::test]
async fn test_run_returns_events() {
    let base = serve().await;
    let client = client(&base);

    let events: Vec<Value> = client.run("user_1", "session_1", "hello").await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["content"]["parts"][0]["text"], "echo: hello");
    assert_eq!(reconcile_events(&events).panels.len(), 1);
}

#[tokio::test]
async fn test_run_unknown_session_is_api_error() {
    let base = serve().await;
    let client = client(&base);

    let err = client.run("user_1", "missing", "hello").await.unwrap_err();
    match err.kind() {
        PanelwrightErrorKind::Client(e) => match &e.kind {
            ClientErrorKind::Api { status, body } => {
                assert_eq!(*status, 404);
                assert!(body.contains("Session not found"));
            }
            other => panic!("Expected API error, got {:?}", other),
        },
        other => panic!("Expected client error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_sse_skips_invalid_lines() {
    let base = serve().await;
    let client = client(&base);

    let stream = client.run_sse("user_1", "session_1", "go").await.unwrap();
    let events: Vec<Value> = stream.map(|event| event.unwrap()).collect().await;
    assert_eq!(events.len(), 2);

    let comic = reconcile_events(&events);
    assert_eq!(comic.title.as_deref(), Some("Streamed"));
    assert_eq!(comic.panels[0].image_url.as_deref(), Some("https://img/1.png"));
}

#[tokio::test]
async fn test_unreachable_backend() {
    let client = client("http://127.0.0.1:9");
    assert!(client.health_check().await.is_err());
    let err = client.run("u", "s", "hi").await.unwrap_err();
    assert!(matches!(err.kind(), PanelwrightErrorKind::Client(_)));
}

#[tokio::test]
async fn test_health_check() {
    let base = serve().await;
    client(&base).health_check().await.unwrap();
}
