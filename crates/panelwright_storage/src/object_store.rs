//! Object store trait definition.

use crate::MediaKind;
use panelwright_error::PanelwrightResult;

/// Options for a single upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// MIME type of the object
    pub content_type: String,
    /// Replace an existing object at the same path
    pub upsert: bool,
}

impl UploadOptions {
    /// Upsert with the content type of a media kind.
    pub fn upsert(kind: MediaKind) -> Self {
        Self {
            content_type: kind.content_type().to_string(),
            upsert: true,
        }
    }
}

/// An object written to a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Bucket the object lives in
    pub bucket: String,
    /// Path inside the bucket
    pub path: String,
    /// URL the object can be fetched from
    pub public_url: String,
    /// SHA-256 of the content
    pub content_hash: String,
    /// Size of the object in bytes
    pub size_bytes: u64,
    /// MIME type
    pub content_type: String,
}

/// Bucketed object storage for finished comic media.
///
/// Paths are `/`-separated and relative to the bucket.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object.
    ///
    /// Fails with `StorageErrorKind::AlreadyExists` when the path is taken
    /// and `options.upsert` is false.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: &[u8],
        options: &UploadOptions,
    ) -> PanelwrightResult<StoredObject>;

    /// Read an object back.
    async fn download(&self, bucket: &str, path: &str) -> PanelwrightResult<Vec<u8>>;

    /// URL an object is served from. Does not check that the object exists.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Whether a URL points into this store.
    fn is_hosted(&self, url: &str) -> bool;

    /// Delete objects. Missing paths are skipped; the deleted paths are returned.
    async fn remove(&self, bucket: &str, paths: &[String]) -> PanelwrightResult<Vec<String>>;

    /// Entries directly under a folder, as `folder/name`, sorted.
    async fn list(&self, bucket: &str, folder: &str) -> PanelwrightResult<Vec<String>>;
}
