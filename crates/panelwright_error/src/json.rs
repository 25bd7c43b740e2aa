//! JSON errors at the edges: request bodies and printed comics.

/// JSON failure conditions. `subject` names the document involved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum JsonErrorKind {
    /// Input was not valid JSON
    #[display("Invalid {}: {}", subject, message)]
    Parse {
        /// Document being read, e.g. "session state"
        subject: String,
        /// Parser message
        message: String,
    },
    /// Valid JSON, but not an object where one is required
    #[display("{} must be a JSON object, got {}", subject, found)]
    NotAnObject {
        /// Document being read
        subject: String,
        /// The value received
        found: String,
    },
    /// A value could not be written out
    #[display("Failed to serialize {}: {}", subject, message)]
    Serialize {
        /// Document being written, e.g. "comic"
        subject: String,
        /// Serializer message
        message: String,
    },
}

/// JSON error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", kind, line, file)]
pub struct JsonError {
    /// What failed
    pub kind: JsonErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use panelwright_error::{JsonError, JsonErrorKind};
    ///
    /// let err = JsonError::new(JsonErrorKind::NotAnObject {
    ///     subject: "Session state".to_string(),
    ///     found: "[1,2]".to_string(),
    /// });
    /// assert_eq!(err.kind.to_string(), "Session state must be a JSON object, got [1,2]");
    /// ```
    #[track_caller]
    pub fn new(kind: JsonErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
