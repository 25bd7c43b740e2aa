//! Mapping of Panelwright errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use panelwright_error::{PanelwrightError, PanelwrightErrorKind, SessionErrorKind};
use serde_json::json;

/// Error returned by request handlers.
///
/// Rendered as `{"error": "..."}` with a status derived from the error kind.
#[derive(Debug, derive_more::Display, derive_more::From)]
#[display("{}", _0)]
pub struct ApiError(PanelwrightError);

impl ApiError {
    /// HTTP status for the wrapped error.
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            PanelwrightErrorKind::Session(e) => match e.kind {
                SessionErrorKind::AlreadyExists(_) => StatusCode::CONFLICT,
                SessionErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
                SessionErrorKind::MissingFields(_) => StatusCode::BAD_REQUEST,
            },
            PanelwrightErrorKind::Json(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller.
    ///
    /// Session and JSON problems report just their kind; anything else keeps the full
    /// error text so backend logs and client messages agree.
    pub fn message(&self) -> String {
        match self.0.kind() {
            PanelwrightErrorKind::Session(e) => e.kind.to_string(),
            PanelwrightErrorKind::Json(e) => e.kind.to_string(),
            _ => self.0.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, status = %status, "Request rejected");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

/// Result type of request handlers.
pub type ApiResult<T> = Result<T, ApiError>;
