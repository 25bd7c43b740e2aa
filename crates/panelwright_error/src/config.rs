//! Configuration loading errors.

/// Configuration failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A layer could not be read or merged
    #[display("Failed to build configuration: {}", _0)]
    Load(String),
    /// Merged layers do not fit the settings schema
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
    /// A command needs a cargo feature this build lacks
    #[display("`{}` requires the `{}` feature", command, feature)]
    FeatureDisabled {
        /// CLI command that was invoked
        command: &'static str,
        /// Feature it depends on
        feature: &'static str,
    },
}

/// Configuration error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// What failed
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use panelwright_error::{ConfigError, ConfigErrorKind};
    ///
    /// let err = ConfigError::new(ConfigErrorKind::FeatureDisabled {
    ///     command: "serve",
    ///     feature: "gemini",
    /// });
    /// assert!(err.to_string().contains("`serve` requires the `gemini` feature"));
    /// ```
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
