//! Comic generation for Panelwright.
//!
//! A turn starts with the [`RequirementsAgent`], which chats with a parent
//! until the lesson, child's age, language and panel count are confirmed.
//! Confirmed requirements trigger the [`ComicPipeline`]:
//!
//! | Stage | Event author | State slot |
//! |-------|--------------|------------|
//! | Script | `script_generator` | `comic_script` |
//! | Image prompts | `image_prompt_generator` | `image_prompts` |
//! | Images | `image_generator` | `generated_images` |
//! | Audio | `tts_generator` | `generated_audio` |
//!
//! Stages share a typed [`ComicContext`]; the slots are published on events
//! for clients. [`ComicRunner`] ties the agent and pipeline to a
//! [`SessionStore`] and streams events to an [`EventSink`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod context;
mod extraction;
mod instructions;
mod pipeline;
mod runner;
mod session;
mod sink;
mod stage;

pub use agent::{AGENT_NAME, AgentReply, RequirementsAgent, interpret_reply};
pub use context::ComicContext;
pub use extraction::{extract_json, find_json, parse_json, strip_fenced_block};
pub use instructions::Instructions;
pub use pipeline::ComicPipeline;
pub use runner::ComicRunner;
pub use session::{Session, SessionKey, SessionStore};
pub use sink::{EventLog, EventSink, Tee};
pub use stage::Stage;
