//! In-memory session store.

use panelwright_core::{AgentEvent, Message, SessionInfo};
use panelwright_error::{PanelwrightResult, SessionError, SessionErrorKind};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Address of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("{}/{}/{}", app_name, user_id, session_id)]
pub struct SessionKey {
    /// Application name
    pub app_name: String,
    /// User the session belongs to
    pub user_id: String,
    /// Session id, unique per user
    pub session_id: String,
}

impl SessionKey {
    /// Build a key.
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }
}

/// One conversation: its state, chat history and emitted events.
#[derive(Debug, Clone)]
pub struct Session {
    /// Where the session lives
    pub key: SessionKey,
    /// Flat key-value state (requirements and stage slots)
    pub state: Map<String, Value>,
    /// Messages exchanged with the requirements agent
    pub history: Vec<Message>,
    /// Every event produced in this session
    pub events: Vec<AgentEvent>,
    /// Seconds since the epoch of the last change
    pub last_update_time: f64,
}

impl Session {
    fn new(key: SessionKey, state: Map<String, Value>) -> Self {
        Self {
            key,
            state,
            history: Vec::new(),
            events: Vec::new(),
            last_update_time: now_seconds(),
        }
    }

    /// Apply an event's state delta and record it.
    pub fn append_event(&mut self, event: AgentEvent) {
        for (key, value) in &event.actions.state_delta {
            self.state.insert(key.clone(), value.clone());
        }
        self.last_update_time = event.timestamp.max(now_seconds());
        self.events.push(event);
    }

    /// Summary returned by the HTTP surface.
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.key.session_id.clone(),
            app_name: self.key.app_name.clone(),
            user_id: self.key.user_id.clone(),
            state: self.state.clone(),
            last_update_time: self.last_update_time,
        }
    }
}

fn now_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Sessions addressed by (app, user, session).
///
/// Each session sits behind its own lock; holding it for a whole turn keeps
/// turns within a session in order while other sessions proceed.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionKey, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with initial state.
    ///
    /// # Errors
    ///
    /// `SessionErrorKind::AlreadyExists` when the key is taken.
    #[tracing::instrument(skip(self, state), fields(key = %key))]
    pub async fn create(
        &self,
        key: SessionKey,
        state: Map<String, Value>,
    ) -> PanelwrightResult<SessionInfo> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&key) {
            return Err(SessionError::new(SessionErrorKind::AlreadyExists(key.to_string())).into());
        }

        let session = Session::new(key.clone(), state);
        let info = session.info();
        sessions.insert(key, Arc::new(Mutex::new(session)));
        tracing::info!("Session created");
        Ok(info)
    }

    /// Handle to a session.
    ///
    /// # Errors
    ///
    /// `SessionErrorKind::NotFound` for an unknown key.
    pub async fn get(&self, key: &SessionKey) -> PanelwrightResult<Arc<Mutex<Session>>> {
        self.sessions
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| SessionError::new(SessionErrorKind::NotFound(key.to_string())).into())
    }

    /// Current summary of a session.
    pub async fn info(&self, key: &SessionKey) -> PanelwrightResult<SessionInfo> {
        let session = self.get(key).await?;
        let session = session.lock().await;
        Ok(session.info())
    }

    /// Summaries of a user's sessions in one app, ordered by id.
    pub async fn list(&self, app_name: &str, user_id: &str) -> Vec<SessionInfo> {
        let handles: Vec<Arc<Mutex<Session>>> = self
            .sessions
            .read()
            .await
            .iter()
            .filter(|(key, _)| key.app_name == app_name && key.user_id == user_id)
            .map(|(_, session)| session.clone())
            .collect();

        let mut infos = Vec::with_capacity(handles.len());
        for handle in handles {
            infos.push(handle.lock().await.info());
        }
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }

    /// Remove a session. Returns whether it existed.
    #[tracing::instrument(skip(self), fields(key = %key))]
    pub async fn delete(&self, key: &SessionKey) -> bool {
        self.sessions.write().await.remove(key).is_some()
    }
}
