//! HTTP backend for the Panelwright comic agent.
//!
//! Exposes session management and turn execution over axum:
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /health` | Liveness |
//! | `POST /api/agent/sessions` | Create a session from a JSON body |
//! | `POST /apps/{app}/users/{user}/sessions/{session}` | Create a session (409 if it exists) |
//! | `GET /apps/{app}/users/{user}/sessions[/{session}]` | Inspect sessions |
//! | `POST /run`, `POST /api/agent/run` | Run a turn, return all events |
//! | `POST /run_sse`, `POST /api/agent/run_sse` | Run a turn, stream events |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod error;

pub use api::{AppState, create_router, serve};
pub use error::{ApiError, ApiResult};
