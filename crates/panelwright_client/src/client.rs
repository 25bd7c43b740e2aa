//! HTTP client for the agent backend.

use crate::sse::parse_sse_stream;
use futures::Stream;
use panelwright_config::ClientSettings;
use panelwright_core::{NewMessage, RunAgentRequest, SessionCreated};
use panelwright_error::{ClientError, ClientErrorKind, PanelwrightResult};
use serde_json::{Map, Value};
use std::pin::Pin;
use std::time::Duration;
use tracing::instrument;

/// Stream of backend events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<Value, ClientError>> + Send>>;

/// Chat message shown when the backend cannot be reached.
///
/// # Examples
///
/// ```
/// use panelwright_client::fallback_message;
///
/// assert_eq!(
///     fallback_message("http://localhost:8000"),
///     "Sorry, I encountered an error. Please make sure the backend is running at http://localhost:8000."
/// );
/// ```
pub fn fallback_message(backend_url: &str) -> String {
    format!(
        "Sorry, I encountered an error. Please make sure the backend is running at {}.",
        backend_url
    )
}

/// Client for the agent backend.
///
/// Events are returned as raw JSON; their shape is not trusted. Use
/// [`reconcile_events`](crate::reconcile_events) to recover panels.
#[derive(Debug, Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    base_url: String,
    app_name: String,
}

impl AgentClient {
    /// Create a client for an app on the configured backend.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    #[instrument(skip(settings, app_name), fields(backend_url = %settings.backend_url))]
    pub fn new(settings: &ClientSettings, app_name: impl Into<String>) -> PanelwrightResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ClientError::new(ClientErrorKind::Http(e.to_string())))?;

        Ok(Self {
            http,
            base_url: settings.backend_url.trim_end_matches('/').to_string(),
            app_name: app_name.into(),
        })
    }

    /// Backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// App the client creates sessions under.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Check that the backend answers.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> PanelwrightResult<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::error!("Health check failed: {}", e);
            ClientError::new(ClientErrorKind::Http(format!("Health check failed: {}", e)))
        })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await.into())
        }
    }

    /// Create a session. An existing session counts as success with `exists: true`.
    #[instrument(skip(self, state))]
    pub async fn create_session(
        &self,
        user_id: &str,
        session_id: &str,
        state: Map<String, Value>,
    ) -> PanelwrightResult<SessionCreated> {
        let url = format!(
            "{}/apps/{}/users/{}/sessions/{}",
            self.base_url, self.app_name, user_id, session_id
        );

        let response = self
            .http
            .post(&url)
            .json(&Value::Object(state))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Session request failed: {}", e);
                ClientError::new(ClientErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        match response.status() {
            status if status.is_success() => {
                tracing::debug!("Session created");
                Ok(SessionCreated {
                    session_id: session_id.to_string(),
                    exists: false,
                })
            }
            reqwest::StatusCode::CONFLICT => {
                tracing::debug!("Session already exists");
                Ok(SessionCreated {
                    session_id: session_id.to_string(),
                    exists: true,
                })
            }
            _ => Err(api_error(response).await.into()),
        }
    }

    /// Send a message and wait for every event of the turn.
    #[instrument(skip(self, message))]
    pub async fn run(
        &self,
        user_id: &str,
        session_id: &str,
        message: &str,
    ) -> PanelwrightResult<Vec<Value>> {
        let response = self
            .post_run("run", self.run_request(user_id, session_id, message, false))
            .await?;

        let events: Vec<Value> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse events: {}", e);
            ClientError::new(ClientErrorKind::Deserialization(format!(
                "Failed to parse events: {}",
                e
            )))
        })?;

        tracing::debug!(events = events.len(), "Turn complete");
        Ok(events)
    }

    /// Send a message and stream events as the backend emits them.
    ///
    /// Lines that are not valid JSON are skipped.
    #[instrument(skip(self, message))]
    pub async fn run_sse(
        &self,
        user_id: &str,
        session_id: &str,
        message: &str,
    ) -> PanelwrightResult<EventStream> {
        let response = self
            .post_run("run_sse", self.run_request(user_id, session_id, message, true))
            .await?;
        Ok(Box::pin(parse_sse_stream(response)))
    }

    fn run_request(
        &self,
        user_id: &str,
        session_id: &str,
        message: &str,
        streaming: bool,
    ) -> RunAgentRequest {
        RunAgentRequest {
            app_name: self.app_name.clone(),
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            new_message: NewMessage::user(message),
            streaming,
        }
    }

    async fn post_run(
        &self,
        route: &str,
        request: RunAgentRequest,
    ) -> PanelwrightResult<reqwest::Response> {
        let url = format!("{}/{}", self.base_url, route);
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Run request failed: {}", e);
                ClientError::new(ClientErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            return Err(api_error(response).await.into());
        }
        Ok(response)
    }
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    tracing::error!(status, body = %body, "Backend returned error");
    ClientError::new(ClientErrorKind::Api { status, body })
}
