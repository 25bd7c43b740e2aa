//! Panelwright - children's comics that teach a lesson
//!
//! A parent chats with a requirements agent about the lesson, the child's
//! age, the narration language and the number of panels. Once they confirm,
//! a fixed pipeline writes a script, turns it into image prompts, draws each
//! panel and narrates it in the chosen language.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use panelwright::{EventLog, PanelwrightConfig, Requirements, build_runner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PanelwrightConfig::load()?;
//!     let runner = build_runner(&config)?;
//!
//!     let requirements: Requirements = serde_json::from_str(
//!         r#"{"lesson":"sharing","childAge":6,"language":"en-IN","panelCount":4}"#,
//!     )?;
//!     let context = runner
//!         .pipeline()
//!         .execute("cli", &requirements, &EventLog::new())
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&context.assemble())?);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `gemini` (default) - Gemini language model driver and [`build_runner`]
//! - `observability` - OpenTelemetry span export
//! - `api` - gate tests that call real provider APIs
//!
//! # Architecture
//!
//! - `panelwright_core` - Data model, events, tool records
//! - `panelwright_error` - Error types
//! - `panelwright_interface` - Driver and media provider traits
//! - `panelwright_config` - Layered configuration
//! - `panelwright_models` - Gemini, Replicate and Sarvam clients
//! - `panelwright_storage` - Local output files and object storage
//! - `panelwright_tools` - Image and audio tools
//! - `panelwright_pipeline` - Requirements agent, pipeline, sessions
//! - `panelwright_client` - Backend client and panel reconciliation
//! - `panelwright_server` - HTTP backend
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod setup;

pub use panelwright_client::*;
pub use panelwright_config::*;
pub use panelwright_core::*;
pub use panelwright_error::*;
pub use panelwright_interface::*;
pub use panelwright_models::*;
pub use panelwright_pipeline::*;
pub use panelwright_server::*;
pub use panelwright_storage::*;
pub use panelwright_tools::*;

#[cfg(feature = "gemini")]
pub use setup::build_runner;
pub use setup::{build_runner_with, build_tools, media_persister, object_store};

#[cfg(feature = "observability")]
pub mod observability;
