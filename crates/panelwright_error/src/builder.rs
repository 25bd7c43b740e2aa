//! Errors raised while assembling typed requests.

/// What could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A language model request
    #[display("Invalid model request: {}", _0)]
    Request(String),
    /// A chat message
    #[display("Invalid message: {}", _0)]
    Message(String),
}

/// Request assembly error with location tracking.
///
/// # Examples
///
/// ```
/// use panelwright_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::new(BuilderErrorKind::Request("`messages` must be initialized".into()));
/// assert!(format!("{}", err).starts_with("Builder Error: Invalid model request"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error at the caller's location.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// What failed to assemble.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}
