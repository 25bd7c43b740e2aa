//! Media kinds and payload helpers.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use panelwright_error::{PanelwrightResult, StorageError, StorageErrorKind};
use regex::Regex;
use std::sync::LazyLock;

static DATA_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:audio/\w+;base64,").expect("Valid data URL regex"));

/// Kind of media a panel carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, strum::EnumIter,
)]
pub enum MediaKind {
    /// PNG panel illustration
    #[display("image")]
    Image,
    /// WAV panel narration
    #[display("audio")]
    Audio,
}

impl MediaKind {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Image => "png",
            MediaKind::Audio => "wav",
        }
    }

    /// MIME type sent with uploads.
    pub fn content_type(&self) -> &'static str {
        match self {
            MediaKind::Image => "image/png",
            MediaKind::Audio => "audio/wav",
        }
    }

    /// Subdirectory of the local output directory.
    pub fn output_dir(&self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Audio => "audio",
        }
    }

    /// Object path of a panel's media: `{userId}/{comicId}/panel_{panelId}.{ext}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use panelwright_storage::MediaKind;
    ///
    /// assert_eq!(
    ///     MediaKind::Audio.object_path("user_ab12", "comic_1700000000000", 3),
    ///     "user_ab12/comic_1700000000000/panel_3.wav"
    /// );
    /// ```
    pub fn object_path(&self, user_id: &str, comic_id: &str, panel_id: u32) -> String {
        format!(
            "{}/{}/panel_{}.{}",
            user_id,
            comic_id,
            panel_id,
            self.extension()
        )
    }
}

/// Decode base64 audio, dropping any `data:audio/...;base64,` prefix.
///
/// # Examples
///
/// ```
/// use panelwright_storage::decode_audio_base64;
///
/// assert_eq!(decode_audio_base64("data:audio/wav;base64,UklGRg==").unwrap(), b"RIFF");
/// assert_eq!(decode_audio_base64("UklGRg==").unwrap(), b"RIFF");
/// ```
pub fn decode_audio_base64(encoded: &str) -> PanelwrightResult<Vec<u8>> {
    let payload = DATA_URL_PREFIX.replace(encoded.trim(), "");
    STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| StorageError::new(StorageErrorKind::Decode(e.to_string())).into())
}
