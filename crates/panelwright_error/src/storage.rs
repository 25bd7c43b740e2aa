//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create a storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Object not found at the specified location
    #[display("Object not found: {}", _0)]
    NotFound(String),
    /// Object already exists and upsert was not requested
    #[display("Object already exists: {}", _0)]
    AlreadyExists(String),
    /// Invalid object path or bucket name
    #[display("Invalid storage path: {}", _0)]
    InvalidPath(String),
    /// Unknown bucket
    #[display("Unknown bucket: {}", _0)]
    UnknownBucket(String),
    /// Media payload could not be decoded
    #[display("Failed to decode media: {}", _0)]
    Decode(String),
    /// Remote media could not be fetched
    #[display("Failed to fetch media: {}", _0)]
    Fetch(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use panelwright_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("user_1/comic_1/panel_1.png".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
