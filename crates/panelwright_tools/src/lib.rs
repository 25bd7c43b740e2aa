//! Media generation tools for Panelwright.
//!
//! Two tools turn panel text into media:
//!
//! - [`GenerateImageTool`] (`generate_comic_image`) draws a panel with an
//!   [`ImageSynthesizer`](panelwright_interface::ImageSynthesizer) and saves
//!   the PNG to the local output directory.
//! - [`GenerateAudioTool`] (`generate_panel_audio`) narrates a panel with a
//!   [`SpeechSynthesizer`](panelwright_interface::SpeechSynthesizer) and
//!   saves the WAV.
//!
//! Both always return a result record. A provider failure becomes
//! `success: false` with an `error` string; nothing is retried.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audio;
mod image;
mod registry;

pub use audio::GenerateAudioTool;
pub use image::GenerateImageTool;
pub use registry::ToolRegistry;

use panelwright_error::{PanelwrightError, PanelwrightErrorKind};

/// Short failure text for a tool record, without the source location.
pub(crate) fn failure_reason(err: &PanelwrightError) -> String {
    match err.kind() {
        PanelwrightErrorKind::Provider(e) => e.kind.to_string(),
        PanelwrightErrorKind::Storage(e) => e.kind.to_string(),
        other => other.to_string(),
    }
}

/// Panel id from loosely-typed arguments, `0` when absent.
pub(crate) fn panel_id_from(args: &serde_json::Value) -> u32 {
    args.get("panelId")
        .and_then(serde_json::Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
        .unwrap_or(0)
}
