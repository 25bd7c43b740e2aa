//! Request and response bodies of the agent HTTP surface.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a session creation request.
///
/// Identifying fields default to empty so the handler can report which are missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Application name
    #[serde(default)]
    pub app_name: String,
    /// User the session belongs to
    #[serde(default)]
    pub user_id: String,
    /// Session id chosen by the client
    #[serde(default)]
    pub session_id: String,
    /// Initial session state
    #[serde(default)]
    pub state: Map<String, Value>,
}

impl CreateSessionRequest {
    /// Names of identifying fields left empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("appName", &self.app_name),
            ("userId", &self.user_id),
            ("sessionId", &self.session_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// A session as reported by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// Session id
    pub id: String,
    /// Application name
    pub app_name: String,
    /// Owning user
    pub user_id: String,
    /// Current state
    #[serde(default)]
    pub state: Map<String, Value>,
    /// Seconds since the Unix epoch of the last change
    #[serde(default)]
    pub last_update_time: f64,
}

/// Outcome of creating a session. An existing session is not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    /// Session id
    pub session_id: String,
    /// True when the session already existed
    #[serde(default)]
    pub exists: bool,
}

/// A text part of a user message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextPart {
    /// The text
    #[serde(default)]
    pub text: String,
}

/// The user message submitted for a turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewMessage {
    /// Always `user`
    #[serde(default)]
    pub role: String,
    /// Text parts
    #[serde(default)]
    pub parts: Vec<TextPart>,
}

impl NewMessage {
    /// A single-part user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![TextPart { text: text.into() }],
        }
    }

    /// All parts joined by newlines.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Body of a run request.
///
/// # Examples
///
/// ```
/// use panelwright_core::RunAgentRequest;
///
/// let json = r#"{
///     "appName": "agent",
///     "userId": "user_abc",
///     "sessionId": "session_1",
///     "newMessage": {"role": "user", "parts": [{"text": "Hi"}]},
///     "streaming": false
/// }"#;
/// let request: RunAgentRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.new_message.text(), "Hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAgentRequest {
    /// Application name
    #[serde(default)]
    pub app_name: String,
    /// User the session belongs to
    #[serde(default)]
    pub user_id: String,
    /// Session to run in
    #[serde(default)]
    pub session_id: String,
    /// The user's message
    pub new_message: NewMessage,
    /// Whether the client asked for streaming
    #[serde(default)]
    pub streaming: bool,
}
