//! Layered configuration for Panelwright.
//!
//! Values are merged with this precedence (highest last):
//! - bundled defaults (`panelwright.toml` at the workspace root, compiled in)
//! - `~/.config/panelwright/panelwright.toml`
//! - `./panelwright.toml`
//! - `PANELWRIGHT__SECTION__KEY` environment variables
//!
//! The client backend URL can also be set with `PANELWRIGHT_BACKEND_URL`.
//! Provider credentials never live here; each provider client reads its own
//! environment variable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::{
    AgentSettings, ClientSettings, ImageSettings, OutputSettings, PanelwrightConfig,
    ServerSettings, SpeechSettings, StorageSettings,
};
