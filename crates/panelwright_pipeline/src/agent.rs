//! The conversational agent that gathers story requirements.

use crate::{find_json, parse_json, strip_fenced_block};
use panelwright_core::{GenerateRequestBuilder, Message, Requirements};
use panelwright_error::{BuilderError, BuilderErrorKind, PanelwrightResult};
use panelwright_interface::ComicDriver;
use std::sync::Arc;

/// Author name of the agent's events.
pub const AGENT_NAME: &str = "comic_requirements_agent";

/// One agent reply.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    /// Text shown to the parent, with any requirements block removed
    pub text: String,
    /// Confirmed requirements, present once the parent has agreed
    pub requirements: Option<Requirements>,
}

/// Chats with a parent until lesson, age, language and panel count are confirmed.
#[derive(Clone)]
pub struct RequirementsAgent {
    driver: Arc<dyn ComicDriver>,
    instruction: String,
    model: Option<String>,
}

impl std::fmt::Debug for RequirementsAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequirementsAgent")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl RequirementsAgent {
    /// Create an agent with a system instruction.
    pub fn new(driver: Arc<dyn ComicDriver>, instruction: impl Into<String>) -> Self {
        Self {
            driver,
            instruction: instruction.into(),
            model: None,
        }
    }

    /// Use a specific model instead of the driver's default.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Produce the next reply for a conversation ending in a user message.
    #[tracing::instrument(skip(self, history), fields(turns = history.len()))]
    pub async fn respond(&self, history: &[Message]) -> PanelwrightResult<AgentReply> {
        let mut builder = GenerateRequestBuilder::default();
        builder
            .messages(history.to_vec())
            .system_instruction(Some(self.instruction.clone()))
            .temperature(Some(0.7));
        if let Some(model) = &self.model {
            builder.model(Some(model.clone()));
        }
        let request = builder
            .build()
            .map_err(|e| BuilderError::new(BuilderErrorKind::Request(e.to_string())))?;

        let response = self.driver.generate(&request).await?;
        Ok(interpret_reply(&response.text()))
    }
}

/// Split a raw model reply into display text and confirmed requirements.
///
/// A JSON block that does not describe valid requirements means the
/// conversation is not finished; the reply is shown as-is.
pub fn interpret_reply(raw: &str) -> AgentReply {
    let Some(json) = find_json(raw) else {
        return AgentReply {
            text: raw.trim().to_string(),
            requirements: None,
        };
    };

    let requirements = match parse_json::<Requirements>(AGENT_NAME, &json) {
        Ok(requirements) => match requirements.validate() {
            Ok(()) => Some(requirements),
            Err(e) => {
                tracing::info!(error = %e, "Requirements not ready yet");
                None
            }
        },
        Err(e) => {
            tracing::info!(error = %e, "Reply JSON is not a requirements object");
            None
        }
    };

    let Some(requirements) = requirements else {
        return AgentReply {
            text: raw.trim().to_string(),
            requirements: None,
        };
    };

    if !requirements.has_suggested_panel_count() {
        tracing::info!(panel_count = requirements.panel_count, "Unusual panel count requested");
    }

    let mut text = strip_fenced_block(raw);
    if text.contains(&json) {
        text = text.replace(&json, "").trim().to_string();
    }
    if text.is_empty() {
        text = format!(
            "Creating your comic about {} now!",
            requirements.lesson
        );
    }

    AgentReply {
        text,
        requirements: Some(requirements),
    }
}
