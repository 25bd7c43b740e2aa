//! Error types for hosted media providers (image synthesis, speech synthesis).

/// Media provider error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Credential environment variable not set
    #[display("{} environment variable not set", _0)]
    MissingCredentials(String),
    /// Request could not be sent
    #[display("{} request failed: {}", provider, message)]
    Request {
        /// Provider name
        provider: String,
        /// Transport error message
        message: String,
    },
    /// Provider answered with a non-success status
    #[display("{} API error: {} - {}", provider, status, body)]
    Status {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },
    /// Provider response could not be parsed
    #[display("Invalid {} response: {}", provider, message)]
    InvalidResponse {
        /// Provider name
        provider: String,
        /// Parse error message
        message: String,
    },
    /// Prediction finished without success
    #[display("Prediction failed: {}", _0)]
    PredictionFailed(String),
    /// Prediction did not finish in time
    #[display("Prediction timed out after {} seconds", _0)]
    PredictionTimedOut(u64),
    /// Response carried no media
    #[display("No media returned: {}", _0)]
    MissingOutput(String),
    /// Generated media could not be downloaded
    #[display("Failed to download media: {}", _0)]
    Download(String),
    /// Generated media could not be decoded
    #[display("Failed to decode media: {}", _0)]
    Decode(String),
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use panelwright_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::Status {
///     provider: "Sarvam".to_string(),
///     status: 401,
///     body: "invalid key".to_string(),
/// });
/// assert!(format!("{}", err).contains("Sarvam API error: 401 - invalid key"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
