//! Turn execution: requirements agent, then the pipeline once requirements are confirmed.

use crate::{
    AGENT_NAME, ComicContext, ComicPipeline, EventLog, EventSink, RequirementsAgent, SessionKey,
    SessionStore, Tee,
};
use panelwright_core::{AgentEvent, Message, Requirements};
use panelwright_error::PanelwrightResult;
use std::sync::Arc;

/// Runs user turns against stored sessions.
#[derive(Debug, Clone)]
pub struct ComicRunner {
    agent: RequirementsAgent,
    pipeline: ComicPipeline,
    sessions: Arc<SessionStore>,
}

impl ComicRunner {
    /// Create a runner over a session store.
    pub fn new(
        agent: RequirementsAgent,
        pipeline: ComicPipeline,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            agent,
            pipeline,
            sessions,
        }
    }

    /// Session store.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Pipeline used once requirements are confirmed.
    pub fn pipeline(&self) -> &ComicPipeline {
        &self.pipeline
    }

    /// Run one user message and return the events it produced.
    ///
    /// Events are also delivered to `sink` as they happen. The session is
    /// locked for the whole turn.
    ///
    /// # Errors
    ///
    /// Unknown sessions, agent failures and pipeline stage failures. Events
    /// emitted before a failure stay in the session.
    #[tracing::instrument(skip(self, text, sink), fields(key = %key))]
    pub async fn run_turn(
        &self,
        key: &SessionKey,
        text: &str,
        sink: &dyn EventSink,
    ) -> PanelwrightResult<Vec<AgentEvent>> {
        let handle = self.sessions.get(key).await?;
        let mut session = handle.lock().await;

        let invocation_id = format!("e-{}", uuid::Uuid::new_v4());
        session.append_event(AgentEvent::new(&invocation_id, "user").with_text(text));

        // History only grows by whole exchanges, so a failed turn leaves no
        // unanswered user message behind.
        let mut history = session.history.clone();
        history.push(Message::user(text));

        let log = EventLog::new();
        let tee = Tee::new(&log, sink);
        let outcome = self.respond(&invocation_id, &history, &tee).await;

        let events = log.drain();
        for event in &events {
            session.append_event(event.clone());
        }

        let reply = outcome?;
        history.push(Message::assistant(reply));
        session.history = history;
        Ok(events)
    }

    async fn respond(
        &self,
        invocation_id: &str,
        history: &[Message],
        sink: &dyn EventSink,
    ) -> PanelwrightResult<String> {
        let reply = self.agent.respond(history).await?;

        let mut event = AgentEvent::new(invocation_id, AGENT_NAME).with_text(reply.text.clone());
        if let Some(requirements) = &reply.requirements {
            for (key, value) in requirements.state_entries() {
                event = event.with_state_delta(key, value);
            }
        }
        sink.emit(event);

        if let Some(requirements) = reply.requirements {
            tracing::info!(lesson = %requirements.lesson, "Requirements confirmed, generating comic");
            let context = self
                .pipeline
                .execute(invocation_id, &requirements, sink)
                .await?;
            sink.emit(completion_event(invocation_id, &requirements, &context));
        }

        Ok(reply.text)
    }
}

/// Closing message of a generated comic.
fn completion_event(
    invocation_id: &str,
    requirements: &Requirements,
    context: &ComicContext,
) -> AgentEvent {
    let comic = context.assemble();
    let images = context.images.iter().filter(|r| r.success).count();
    let audio = context.audio.iter().filter(|r| r.success).count();

    AgentEvent::new(invocation_id, "comic_pipeline").with_text(format!(
        "Your comic \"{}\" is ready! {} panels in {}, {} with pictures and {} with narration.",
        comic.title,
        comic.panels.len(),
        requirements.language.display_name(),
        images,
        audio
    ))
}
