//! Hosted model integrations for Panelwright.
//!
//! # Available Providers
//!
//! - **Gemini** (Google) language models, behind the `gemini` feature
//! - **Replicate** image models
//! - **Sarvam** text-to-speech
//!
//! Every client reads its credential from the environment and makes a single
//! attempt per call. Failures surface as errors; turning them into tool
//! result records is the caller's job.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod replicate;
mod sarvam;

pub use replicate::ReplicateClient;
pub use sarvam::SarvamClient;

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;
