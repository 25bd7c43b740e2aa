//! Client side of the Panelwright agent backend.
//!
//! [`AgentClient`] creates sessions and runs turns over HTTP, either
//! collecting the whole event list or streaming server-sent events.
//! [`reconcile_events`] turns whatever events came back into one list of
//! panels, joining script, image and audio data by panel id.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod reconcile;
mod sse;

pub use client::{AgentClient, EventStream, fallback_message};
pub use reconcile::{ReconciledComic, extract_image_urls, final_response, reconcile_events};
pub use sse::{parse_sse_line, parse_sse_text};
