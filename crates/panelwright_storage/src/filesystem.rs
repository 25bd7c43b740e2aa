//! Filesystem-backed object store.

use crate::{ObjectStore, StoredObject, UploadOptions};
use panelwright_error::{PanelwrightResult, StorageError, StorageErrorKind};
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Object store that keeps each bucket as a directory.
///
/// ```text
/// {root}/
/// ├── comic-images/
/// │   └── user_ab12/
/// │       └── comic_1700000000000/
/// │           ├── panel_1.png
/// │           └── panel_2.png
/// └── comic-audio/
///     └── user_ab12/
///         └── comic_1700000000000/
///             └── panel_1.wav
/// ```
///
/// Writes go to a temporary file first and are renamed into place.
/// Public URLs use `public_base_url` when configured (for a directory served
/// by a web server) and `file://` URLs otherwise.
#[derive(Debug, Clone)]
pub struct FileSystemObjectStore {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl FileSystemObjectStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or resolved.
    #[tracing::instrument(skip(root, public_base_url))]
    pub fn new(
        root: impl Into<PathBuf>,
        public_base_url: Option<String>,
    ) -> PanelwrightResult<Self> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        let root = std::path::absolute(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        tracing::info!(path = %root.display(), "Opened filesystem object store");
        Ok(Self {
            root,
            public_base_url: public_base_url.map(|url| url.trim_end_matches('/').to_string()),
        })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    fn validate_bucket(bucket: &str) -> Result<(), StorageError> {
        let valid = !bucket.is_empty()
            && bucket
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(StorageError::new(StorageErrorKind::UnknownBucket(
                bucket.to_string(),
            )))
        }
    }

    /// Resolve a bucket-relative path, rejecting anything that escapes the bucket.
    fn resolve(&self, bucket: &str, path: &str) -> Result<PathBuf, StorageError> {
        Self::validate_bucket(bucket)?;

        let relative = Path::new(path.trim_matches('/'));
        let only_normal = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if path.trim_matches('/').is_empty() || !only_normal {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(
                path.to_string(),
            )));
        }

        Ok(self.root.join(bucket).join(relative))
    }

    fn local_url_prefix(&self) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/", base),
            None => format!("file://{}/", self.root.display()),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for FileSystemObjectStore {
    #[tracing::instrument(skip(self, data, options), fields(size = data.len(), upsert = options.upsert))]
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: &[u8],
        options: &UploadOptions,
    ) -> PanelwrightResult<StoredObject> {
        let target = self.resolve(bucket, path)?;

        if !options.upsert && tokio::fs::try_exists(&target).await.unwrap_or(false) {
            return Err(StorageError::new(StorageErrorKind::AlreadyExists(format!(
                "{}/{}",
                bucket, path
            )))
            .into());
        }

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = target.with_file_name(format!(".{}.tmp", Uuid::new_v4()));
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &target).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                target.display(),
                e
            )))
        })?;

        let path = path.trim_matches('/').to_string();
        let public_url = self.public_url(bucket, &path);
        tracing::info!(bucket, path = %path, "Stored object");

        Ok(StoredObject {
            bucket: bucket.to_string(),
            public_url,
            content_hash: Self::compute_hash(data),
            size_bytes: data.len() as u64,
            content_type: options.content_type.clone(),
            path,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn download(&self, bucket: &str, path: &str) -> PanelwrightResult<Vec<u8>> {
        let target = self.resolve(bucket, path)?;

        let data = tokio::fs::read(&target).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(format!("{}/{}", bucket, path)))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    target.display(),
                    e
                )))
            }
        })?;

        Ok(data)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.local_url_prefix(),
            bucket,
            path.trim_matches('/')
        )
    }

    fn is_hosted(&self, url: &str) -> bool {
        url.starts_with(&self.local_url_prefix())
    }

    #[tracing::instrument(skip(self, paths), fields(count = paths.len()))]
    async fn remove(&self, bucket: &str, paths: &[String]) -> PanelwrightResult<Vec<String>> {
        let mut removed = Vec::with_capacity(paths.len());

        for path in paths {
            let target = self.resolve(bucket, path)?;
            match tokio::fs::remove_file(&target).await {
                Ok(()) => removed.push(path.trim_matches('/').to_string()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(bucket, path = %path, "Object already absent");
                }
                Err(e) => {
                    return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                        "delete {}: {}",
                        target.display(),
                        e
                    )))
                    .into());
                }
            }
        }

        tracing::info!(bucket, removed = removed.len(), "Deleted objects");
        Ok(removed)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, bucket: &str, folder: &str) -> PanelwrightResult<Vec<String>> {
        let folder = folder.trim_matches('/');
        let dir = if folder.is_empty() {
            Self::validate_bucket(bucket)?;
            self.root.join(bucket)
        } else {
            self.resolve(bucket, folder)?
        };

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
                .into());
            }
        };

        let mut names = Vec::new();
        loop {
            let entry = entries.next_entry().await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
            let Some(entry) = entry else { break };

            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            names.push(if folder.is_empty() {
                name
            } else {
                format!("{}/{}", folder, name)
            });
        }

        names.sort();
        Ok(names)
    }
}
