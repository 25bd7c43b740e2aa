//! Top-level error wrapper types.

use crate::{
    BuilderError, ClientError, ConfigError, GeminiError, HttpError, JsonError, PipelineError,
    ProviderError, SessionError, StorageError,
};

/// Every error condition a Panelwright crate can raise.
///
/// # Examples
///
/// ```
/// use panelwright_error::{PanelwrightError, PanelwrightErrorKind, SessionError, SessionErrorKind};
///
/// let err: PanelwrightError =
///     SessionError::new(SessionErrorKind::NotFound("comics/user_1/session_1".to_string())).into();
/// assert!(matches!(err.kind(), PanelwrightErrorKind::Session(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PanelwrightErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Gemini error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Image or speech provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Session store error
    #[from(SessionError)]
    Session(SessionError),
    /// Backend client error
    #[from(ClientError)]
    Client(ClientError),
}

/// Panelwright error with kind discrimination.
///
/// # Examples
///
/// ```
/// use panelwright_error::{PanelwrightResult, PipelineError, PipelineErrorKind};
///
/// fn write_script() -> PanelwrightResult<()> {
///     Err(PipelineError::new(PipelineErrorKind::EmptyScript))?
/// }
///
/// assert!(write_script().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Panelwright Error: {}", _0)]
pub struct PanelwrightError(Box<PanelwrightErrorKind>);

impl PanelwrightError {
    /// Create a new error from a kind.
    pub fn new(kind: PanelwrightErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PanelwrightErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to PanelwrightErrorKind
impl<T> From<T> for PanelwrightError
where
    T: Into<PanelwrightErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Panelwright operations.
pub type PanelwrightResult<T> = std::result::Result<T, PanelwrightError>;
