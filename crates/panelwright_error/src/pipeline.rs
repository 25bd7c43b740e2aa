//! Pipeline error types.

/// Specific error conditions for the comic pipeline and requirements agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// No JSON could be found in a model response
    #[display("No JSON found in {} response (length: {})", stage, length)]
    MissingJson {
        /// Stage that produced the response
        stage: String,
        /// Response length in bytes
        length: usize,
    },
    /// Model output did not match the expected shape
    #[display("Malformed output from {}: {}", stage, message)]
    MalformedOutput {
        /// Stage that produced the output
        stage: String,
        /// Parse error message
        message: String,
    },
    /// The script contained no panels
    #[display("Comic script has no panels")]
    EmptyScript,
    /// A stage ran before the stage it depends on
    #[display("Stage '{}' requires output from '{}'", stage, requires)]
    MissingStageOutput {
        /// Stage that was attempted
        stage: String,
        /// Stage whose output is missing
        requires: String,
    },
    /// Requirements failed validation
    #[display("Invalid requirements: {}", _0)]
    InvalidRequirements(String),
    /// Agent instructions could not be loaded
    #[display("Failed to load instructions: {}", _0)]
    Instructions(String),
}

/// Pipeline error with source location tracking.
///
/// # Examples
///
/// ```
/// use panelwright_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::EmptyScript);
/// assert!(format!("{}", err).contains("no panels"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
