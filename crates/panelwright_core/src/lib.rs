//! Core data types for the Panelwright comic generator.
//!
//! This crate defines the structures every other Panelwright crate agrees on:
//! the comic artifact, the requirements gathered from a parent, the tool
//! records produced by media generation, the events exchanged with clients,
//! and the request types sent to language models.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod audio;
mod comic;
mod event;
mod ids;
mod language;
mod message;
mod request;
mod requirements;
mod role;
mod synthesis;
mod tool;

pub use api::{CreateSessionRequest, NewMessage, RunAgentRequest, SessionCreated, SessionInfo, TextPart};
pub use audio::AudioSource;
pub use comic::{Comic, ComicScript, ImagePrompts, Panel, PanelPrompt, ScriptPanel};
pub use event::{AgentEvent, EventActions, EventContent, EventPart, FunctionCall, FunctionResponse};
pub use ids::{generate_comic_id, generate_session_id, generate_user_id};
pub use language::Language;
pub use message::{Message, MessageBuilder};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, Output};
pub use requirements::{Requirements, SUGGESTED_PANEL_COUNTS, Theme};
pub use role::Role;
pub use synthesis::{ImageRequest, SpeechRequest, SynthesizedImage, SynthesizedSpeech};
pub use tool::{
    AspectRatio, AudioToolInput, AudioToolOutput, ImageToolInput, ImageToolOutput, Resolution,
    Speaker,
};
