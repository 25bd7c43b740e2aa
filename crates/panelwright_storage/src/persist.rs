//! Best-effort copy of a finished comic's media into object storage.

use crate::{MediaKind, ObjectStore, UploadOptions, decode_audio_base64};
use panelwright_core::{AudioSource, Panel};
use panelwright_error::{PanelwrightResult, StorageError, StorageErrorKind};
use std::sync::Arc;

/// Bucket names for the two media kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBuckets {
    /// Bucket for panel images
    pub images: String,
    /// Bucket for panel audio
    pub audio: String,
}

impl MediaBuckets {
    /// Bucket for a media kind.
    pub fn for_kind(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Image => &self.images,
            MediaKind::Audio => &self.audio,
        }
    }
}

impl Default for MediaBuckets {
    fn default() -> Self {
        Self {
            images: "comic-images".to_string(),
            audio: "comic-audio".to_string(),
        }
    }
}

/// Moves panel media into an [`ObjectStore`] and rewrites panel URLs.
///
/// Persistence never fails a comic: a panel whose media cannot be stored
/// keeps its original image URL and audio.
#[derive(Clone)]
pub struct MediaPersister {
    store: Arc<dyn ObjectStore>,
    http: reqwest::Client,
    buckets: MediaBuckets,
}

impl std::fmt::Debug for MediaPersister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaPersister")
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

impl MediaPersister {
    /// Create a persister over a store.
    pub fn new(store: Arc<dyn ObjectStore>, buckets: MediaBuckets) -> Self {
        Self {
            store,
            http: reqwest::Client::new(),
            buckets,
        }
    }

    /// Underlying store.
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Buckets in use.
    pub fn buckets(&self) -> &MediaBuckets {
        &self.buckets
    }

    /// Persist every panel's media for a signed-in user.
    ///
    /// Anonymous callers (`user_id == None`) get the panels back untouched.
    /// Images already hosted by the store and audio that is already a URL
    /// are left alone.
    #[tracing::instrument(skip(self, panels), fields(panels = panels.len()))]
    pub async fn persist_panels(
        &self,
        user_id: Option<&str>,
        comic_id: &str,
        panels: Vec<Panel>,
    ) -> Vec<Panel> {
        let Some(user_id) = user_id else {
            tracing::debug!("No user, skipping media persistence");
            return panels;
        };

        let mut persisted = Vec::with_capacity(panels.len());
        for mut panel in panels {
            let pending_image = panel
                .image_url
                .clone()
                .filter(|url| !self.store.is_hosted(url));
            if let Some(url) = pending_image {
                match self.persist_image(user_id, comic_id, panel.panel_id, &url).await {
                    Ok(public_url) => panel.image_url = Some(public_url),
                    Err(e) => {
                        tracing::warn!(panel_id = panel.panel_id, error = %e, "Keeping original image URL");
                    }
                }
            }

            if let Some(AudioSource::Base64(encoded)) = panel.audio.clone() {
                match self
                    .persist_audio(user_id, comic_id, panel.panel_id, &encoded)
                    .await
                {
                    Ok(public_url) => panel.audio = Some(AudioSource::Url(public_url)),
                    Err(e) => {
                        tracing::warn!(panel_id = panel.panel_id, error = %e, "Keeping inline audio");
                    }
                }
            }

            persisted.push(panel);
        }

        persisted
    }

    async fn persist_image(
        &self,
        user_id: &str,
        comic_id: &str,
        panel_id: u32,
        url: &str,
    ) -> PanelwrightResult<String> {
        let data = self.fetch(url).await?;
        self.upload(MediaKind::Image, user_id, comic_id, panel_id, &data)
            .await
    }

    async fn persist_audio(
        &self,
        user_id: &str,
        comic_id: &str,
        panel_id: u32,
        encoded: &str,
    ) -> PanelwrightResult<String> {
        let data = decode_audio_base64(encoded)?;
        self.upload(MediaKind::Audio, user_id, comic_id, panel_id, &data)
            .await
    }

    async fn upload(
        &self,
        kind: MediaKind,
        user_id: &str,
        comic_id: &str,
        panel_id: u32,
        data: &[u8],
    ) -> PanelwrightResult<String> {
        let path = kind.object_path(user_id, comic_id, panel_id);
        let object = self
            .store
            .upload(
                self.buckets.for_kind(kind),
                &path,
                data,
                &UploadOptions::upsert(kind),
            )
            .await?;
        Ok(object.public_url)
    }

    async fn fetch(&self, url: &str) -> PanelwrightResult<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Fetch(format!("{}: {}", url, e))))?;

        if !response.status().is_success() {
            return Err(StorageError::new(StorageErrorKind::Fetch(format!(
                "{}: HTTP {}",
                url,
                response.status()
            )))
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Fetch(format!("{}: {}", url, e))))?;
        Ok(bytes.to_vec())
    }
}
