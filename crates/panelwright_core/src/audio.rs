//! Audio payload attached to a panel.

use serde::{Deserialize, Serialize};

/// Narration audio for a panel: inline base64 WAV or a hosted URL.
///
/// Serializes as a bare string. Strings starting with `http://` or
/// `https://` deserialize as URLs, everything else as base64.
///
/// # Examples
///
/// ```
/// use panelwright_core::AudioSource;
///
/// let hosted = AudioSource::from("https://cdn.example.com/panel_1.wav".to_string());
/// assert!(hosted.is_url());
///
/// let inline = AudioSource::from("UklGRiQAAABXQVZF".to_string());
/// assert!(!inline.is_url());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AudioSource {
    /// Base64-encoded audio, optionally with a `data:` prefix
    Base64(String),
    /// Audio hosted at a URL
    Url(String),
}

impl AudioSource {
    /// Whether the audio is already hosted.
    pub fn is_url(&self) -> bool {
        matches!(self, AudioSource::Url(_))
    }

    /// The raw string value.
    pub fn as_str(&self) -> &str {
        match self {
            AudioSource::Base64(value) | AudioSource::Url(value) => value,
        }
    }
}

impl From<String> for AudioSource {
    fn from(value: String) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            AudioSource::Url(value)
        } else {
            AudioSource::Base64(value)
        }
    }
}

impl From<AudioSource> for String {
    fn from(source: AudioSource) -> Self {
        match source {
            AudioSource::Base64(value) | AudioSource::Url(value) => value,
        }
    }
}
