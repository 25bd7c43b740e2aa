//! Events emitted by the agent backend for each turn.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One event of an agent turn.
///
/// Events carry model text, tool calls, tool results and state deltas. The
/// wire shape matches what chat clients already understand: camelCase keys,
/// `content.parts[]` and `actions.stateDelta`.
///
/// # Examples
///
/// ```
/// use panelwright_core::AgentEvent;
/// use serde_json::json;
///
/// let event = AgentEvent::new("inv_1", "image_generator")
///     .with_text("Images ready!")
///     .with_state_delta("generated_images", json!([]));
///
/// assert_eq!(event.text(), Some("Images ready!"));
/// let wire = serde_json::to_value(&event).unwrap();
/// assert_eq!(wire["content"]["parts"][0]["text"], "Images ready!");
/// assert!(wire["actions"]["stateDelta"]["generated_images"].is_array());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentEvent {
    /// Unique event id
    #[serde(default)]
    pub id: String,
    /// Turn the event belongs to
    #[serde(default)]
    pub invocation_id: String,
    /// Agent or stage that produced the event, or `user`
    #[serde(default)]
    pub author: String,
    /// Seconds since the Unix epoch
    #[serde(default)]
    pub timestamp: f64,
    /// Message parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<EventContent>,
    /// Side effects on session state
    #[serde(default)]
    pub actions: EventActions,
}

/// Message content of an event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventContent {
    /// `user` or `model`
    #[serde(default)]
    pub role: String,
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<EventPart>,
}

/// One part of an event's content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPart {
    /// Text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Tool invocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    /// Tool result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

/// A tool invocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Call id, shared with the matching response
    #[serde(default)]
    pub id: String,
    /// Tool name
    pub name: String,
    /// JSON arguments
    #[serde(default)]
    pub args: Value,
}

/// A tool result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunctionResponse {
    /// Call id, shared with the matching call
    #[serde(default)]
    pub id: String,
    /// Tool name
    pub name: String,
    /// JSON result record
    #[serde(default)]
    pub response: Value,
}

/// State changes produced by an event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventActions {
    /// Slots written by this event
    #[serde(default)]
    pub state_delta: Map<String, Value>,
}

impl AgentEvent {
    /// Create an empty event for a turn, stamped with a fresh id and the current time.
    pub fn new(invocation_id: impl Into<String>, author: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            invocation_id: invocation_id.into(),
            author: author.into(),
            timestamp: now.timestamp_millis() as f64 / 1000.0,
            content: None,
            actions: EventActions::default(),
        }
    }

    fn push_part(mut self, part: EventPart) -> Self {
        let role = if self.author == "user" { "user" } else { "model" };
        self.content
            .get_or_insert_with(|| EventContent {
                role: role.to_string(),
                parts: Vec::new(),
            })
            .parts
            .push(part);
        self
    }

    /// Append a text part.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push_part(EventPart {
            text: Some(text.into()),
            ..Default::default()
        })
    }

    /// Append a tool invocation part.
    pub fn with_function_call(self, call: FunctionCall) -> Self {
        self.push_part(EventPart {
            function_call: Some(call),
            ..Default::default()
        })
    }

    /// Append a tool result part.
    pub fn with_function_response(self, response: FunctionResponse) -> Self {
        self.push_part(EventPart {
            function_response: Some(response),
            ..Default::default()
        })
    }

    /// Record a slot in the state delta.
    pub fn with_state_delta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.actions.state_delta.insert(key.into(), value);
        self
    }

    /// Text of the first text part, if any.
    pub fn text(&self) -> Option<&str> {
        self.content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.text.as_deref())
    }
}
