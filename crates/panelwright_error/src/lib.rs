//! Error types for the Panelwright comic generator.
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with the source location that raised it
//! - constructors are `#[track_caller]` so locations are captured automatically
//!
//! # Examples
//!
//! ```
//! use panelwright_error::{PanelwrightResult, StorageError, StorageErrorKind};
//!
//! fn fetch_panel_image() -> PanelwrightResult<Vec<u8>> {
//!     Err(StorageError::new(StorageErrorKind::NotFound(
//!         "comic-images/user_abc/comic_1/panel_2.png".to_string(),
//!     )))?
//! }
//!
//! assert!(fetch_panel_image().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod client;
mod config;
mod error;
mod gemini;
mod http;
mod json;
mod pipeline;
mod provider;
mod session;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use client::{ClientError, ClientErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{PanelwrightError, PanelwrightErrorKind, PanelwrightResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use http::{HttpError, HttpErrorKind};
pub use json::{JsonError, JsonErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use session::{SessionError, SessionErrorKind};
pub use storage::{StorageError, StorageErrorKind};
