//! Errors raised while the backend binds and serves HTTP.

/// HTTP server failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HttpErrorKind {
    /// The listen address could not be bound
    #[display("Failed to bind {}: {}", address, message)]
    Bind {
        /// Address the backend tried to listen on
        address: String,
        /// Underlying IO error
        message: String,
    },
    /// The server loop stopped with an error
    #[display("Server stopped: {}", _0)]
    Serve(String),
}

/// HTTP server error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", kind, line, file)]
pub struct HttpError {
    /// What failed
    pub kind: HttpErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use panelwright_error::{HttpError, HttpErrorKind};
    ///
    /// let err = HttpError::new(HttpErrorKind::Bind {
    ///     address: "0.0.0.0:8000".to_string(),
    ///     message: "address in use".to_string(),
    /// });
    /// assert!(err.to_string().contains("Failed to bind 0.0.0.0:8000"));
    /// ```
    #[track_caller]
    pub fn new(kind: HttpErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
