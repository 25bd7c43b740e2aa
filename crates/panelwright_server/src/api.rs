//! Routes and handlers of the agent backend.

use crate::{ApiError, ApiResult};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{Stream, StreamExt, stream};
use panelwright_core::{AgentEvent, CreateSessionRequest, RunAgentRequest, SessionCreated};
use panelwright_error::{
    HttpError, HttpErrorKind, JsonError, JsonErrorKind, PanelwrightError, PanelwrightErrorKind, PanelwrightResult, SessionError,
    SessionErrorKind,
};
use panelwright_pipeline::{ComicRunner, SessionKey};
use serde_json::{Map, Value, json};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state of the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Runs turns and owns the session store
    pub runner: Arc<ComicRunner>,
}

impl AppState {
    /// Wrap a runner.
    pub fn new(runner: ComicRunner) -> Self {
        Self {
            runner: Arc::new(runner),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

/// Build the backend router.
///
/// Turns are served both under `/api/agent/*` and in the bare `/run` form
/// chat clients use; sessions likewise have a JSON-body route and a
/// path-addressed route.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/agent/sessions", post(create_session))
        .route("/apps/{app_name}/users/{user_id}/sessions", get(list_sessions))
        .route(
            "/apps/{app_name}/users/{user_id}/sessions/{session_id}",
            post(create_addressed_session)
                .get(get_session)
                .delete(delete_session),
        )
        .route("/run", post(run))
        .route("/api/agent/run", post(run))
        .route("/run_sse", post(run_sse))
        .route("/api/agent/run_sse", post(run_sse))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "panelwright"
        })),
    )
}

/// Key for a request, rejecting empty identifiers.
fn session_key(app_name: &str, user_id: &str, session_id: &str) -> PanelwrightResult<SessionKey> {
    let missing: Vec<&str> = [
        ("appName", app_name),
        ("userId", user_id),
        ("sessionId", session_id),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();

    if missing.is_empty() {
        Ok(SessionKey::new(app_name, user_id, session_id))
    } else {
        Err(missing_fields(&missing))
    }
}

fn missing_fields(fields: &[&str]) -> PanelwrightError {
    SessionError::new(SessionErrorKind::MissingFields(fields.join(", "))).into()
}

fn is_conflict(err: &PanelwrightError) -> bool {
    matches!(
        err.kind(),
        PanelwrightErrorKind::Session(e) if matches!(e.kind, SessionErrorKind::AlreadyExists(_))
    )
}

/// Create a session from a JSON body. An existing session is reported, not rejected.
#[tracing::instrument(skip(state, request), fields(session_id = %request.session_id))]
async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> ApiResult<Response> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(missing_fields(&missing).into());
    }

    let key = SessionKey::new(&request.app_name, &request.user_id, &request.session_id);
    match state.runner.sessions().create(key, request.state).await {
        Ok(info) => Ok(Json(info).into_response()),
        Err(e) if is_conflict(&e) => Ok(Json(SessionCreated {
            session_id: request.session_id,
            exists: true,
        })
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Create a session addressed by path. The body, if any, is the initial state.
#[tracing::instrument(skip(state, body))]
async fn create_addressed_session(
    State(state): State<AppState>,
    Path((app_name, user_id, session_id)): Path<(String, String, String)>,
    body: Bytes,
) -> ApiResult<Response> {
    let key = session_key(&app_name, &user_id, &session_id)?;
    let initial_state = initial_state(&body)?;
    let info = state.runner.sessions().create(key, initial_state).await?;
    Ok(Json(info).into_response())
}

fn initial_state(body: &[u8]) -> PanelwrightResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(other) => Err(JsonError::new(JsonErrorKind::NotAnObject {
            subject: "Session state".to_string(),
            found: other.to_string(),
        })
        .into()),
        Err(e) => Err(JsonError::new(JsonErrorKind::Parse {
            subject: "session state".to_string(),
            message: e.to_string(),
        })
        .into()),
    }
}

async fn get_session(
    State(state): State<AppState>,
    Path((app_name, user_id, session_id)): Path<(String, String, String)>,
) -> ApiResult<Response> {
    let key = session_key(&app_name, &user_id, &session_id)?;
    let info = state.runner.sessions().info(&key).await?;
    Ok(Json(info).into_response())
}

async fn list_sessions(
    State(state): State<AppState>,
    Path((app_name, user_id)): Path<(String, String)>,
) -> impl IntoResponse {
    Json(state.runner.sessions().list(&app_name, &user_id).await)
}

async fn delete_session(
    State(state): State<AppState>,
    Path((app_name, user_id, session_id)): Path<(String, String, String)>,
) -> ApiResult<StatusCode> {
    let key = session_key(&app_name, &user_id, &session_id)?;
    if state.runner.sessions().delete(&key).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(PanelwrightError::from(SessionError::new(SessionErrorKind::NotFound(key.to_string()))).into())
    }
}

/// Run one turn and return every event it produced.
#[tracing::instrument(skip(state, request), fields(session_id = %request.session_id))]
async fn run(
    State(state): State<AppState>,
    Json(request): Json<RunAgentRequest>,
) -> ApiResult<Json<Vec<AgentEvent>>> {
    let key = session_key(&request.app_name, &request.user_id, &request.session_id)?;
    let events = state
        .runner
        .run_turn(&key, &request.new_message.text(), &NoopSink)
        .await?;
    Ok(Json(events))
}

struct NoopSink;

impl panelwright_pipeline::EventSink for NoopSink {
    fn emit(&self, _event: AgentEvent) {}
}

/// Run one turn, streaming events as they happen.
///
/// The turn runs on its own task: a client that disconnects stops receiving
/// events but the comic is still finished and stored in the session. A turn
/// failure is sent as a final `{"error": ...}` event.
#[tracing::instrument(skip(state, request), fields(session_id = %request.session_id))]
async fn run_sse(
    State(state): State<AppState>,
    Json(request): Json<RunAgentRequest>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let key = session_key(&request.app_name, &request.user_id, &request.session_id)?;
    // Unknown sessions get a status code rather than an error event.
    state.runner.sessions().get(&key).await?;

    let (events_tx, events_rx) = mpsc::unbounded_channel::<AgentEvent>();
    let (done_tx, done_rx) = oneshot::channel::<Option<String>>();
    let runner = state.runner.clone();
    let text = request.new_message.text();

    tokio::spawn(async move {
        let outcome = runner.run_turn(&key, &text, &events_tx).await;
        drop(events_tx);
        let failure = outcome.err().map(|e| {
            tracing::error!(error = %e, "Streamed turn failed");
            ApiError::from(e).message()
        });
        if done_tx.send(failure).is_err() {
            tracing::debug!("Stream closed before the turn finished");
        }
    });

    let events = UnboundedReceiverStream::new(events_rx).map(|event| {
        let payload = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
        Ok::<Event, Infallible>(Event::default().data(payload))
    });
    let failure = stream::once(done_rx).filter_map(|outcome| async move {
        match outcome {
            Ok(Some(message)) => Some(Ok::<Event, Infallible>(
                Event::default().data(json!({ "error": message }).to_string()),
            )),
            _ => None,
        }
    });

    Ok(Sse::new(events.chain(failure)).keep_alive(KeepAlive::default()))
}

/// Serve the router until Ctrl-C.
///
/// # Errors
///
/// Binding the address or a fatal server error.
pub async fn serve(address: &str, state: AppState) -> PanelwrightResult<()> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|e| {
            HttpError::new(HttpErrorKind::Bind {
                address: address.to_string(),
                message: e.to_string(),
            })
        })?;
    tracing::info!(address = %address, "Panelwright backend listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HttpError::new(HttpErrorKind::Serve(e.to_string())))?;

    tracing::info!("Panelwright backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, stopping gracefully..."),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
