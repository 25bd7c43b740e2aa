//! Trait definitions for the Panelwright comic generator.
//!
//! Hosted providers sit behind these traits so the pipeline can be driven by
//! real clients in production and by scripted mocks in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ComicDriver, ComicTool, ImageSynthesizer, SpeechSynthesizer};
pub use types::ToolDefinition;
