//! Local output directory for generated media.

use crate::MediaKind;
use panelwright_error::{PanelwrightResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// A file written by a generation tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// Full path of the file
    pub path: PathBuf,
    /// File name only
    pub filename: String,
}

/// Directory where tools save every generated image and audio clip.
///
/// Files are never overwritten: each name carries a millisecond timestamp.
#[derive(Debug, Clone)]
pub struct LocalOutputDir {
    base: PathBuf,
}

impl LocalOutputDir {
    /// Use `base` as the output directory. Subdirectories are created on first write.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Save media for a panel as `{kind dir}/panel_{panel_id}_{millis}.{ext}`.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn save(
        &self,
        kind: MediaKind,
        panel_id: u32,
        data: &[u8],
    ) -> PanelwrightResult<SavedFile> {
        let dir = self.base.join(kind.output_dir());
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        let filename = format!(
            "panel_{}_{}.{}",
            panel_id,
            chrono::Utc::now().timestamp_millis(),
            kind.extension()
        );
        let path = dir.join(&filename);

        tokio::fs::write(&path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        tracing::info!(path = %path.display(), "Saved {}", kind);
        Ok(SavedFile { path, filename })
    }
}
