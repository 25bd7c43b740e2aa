//! Input and output records for the media generation tools.

use crate::Language;
use serde::{Deserialize, Serialize};

/// Image aspect ratios the image model accepts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
pub enum AspectRatio {
    /// Square
    #[serde(rename = "1:1")]
    #[strum(serialize = "1:1")]
    Square,
    /// Landscape comic panel
    #[default]
    #[serde(rename = "4:3")]
    #[strum(serialize = "4:3")]
    Landscape,
    /// Portrait comic panel
    #[serde(rename = "3:4")]
    #[strum(serialize = "3:4")]
    Portrait,
    /// Widescreen
    #[serde(rename = "16:9")]
    #[strum(serialize = "16:9")]
    Wide,
    /// Tall
    #[serde(rename = "9:16")]
    #[strum(serialize = "9:16")]
    Tall,
}

/// Output resolution of generated images.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
pub enum Resolution {
    /// Roughly 1024 pixels on the long edge
    #[serde(rename = "1K")]
    #[strum(serialize = "1K")]
    OneK,
    /// Roughly 2048 pixels on the long edge
    #[default]
    #[serde(rename = "2K")]
    #[strum(serialize = "2K")]
    TwoK,
}

/// Narrator voices offered by the speech provider.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Speaker {
    /// Female voice
    #[default]
    Anushka,
    /// Female voice
    Manisha,
    /// Female voice
    Vidya,
    /// Female voice
    Arya,
    /// Male voice
    Abhilash,
    /// Male voice
    Karun,
    /// Male voice
    Hitesh,
}

/// Arguments for `generate_comic_image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageToolInput {
    /// Text-to-image prompt
    pub prompt: String,
    /// Panel the image is for
    pub panel_id: u32,
    /// Aspect ratio, `4:3` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    /// Resolution, `2K` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}

/// Result of `generate_comic_image`. Failures are records, never errors.
///
/// # Examples
///
/// ```
/// use panelwright_core::ImageToolOutput;
///
/// let failed = ImageToolOutput::failed(3, "timeout");
/// let json = serde_json::to_value(&failed).unwrap();
///
/// assert_eq!(json["success"], false);
/// assert!(json["imageUrl"].is_null());
/// assert_eq!(json["message"], "Failed to generate image for panel 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageToolOutput {
    /// Whether the image was generated and saved
    pub success: bool,
    /// Panel the image is for
    pub panel_id: u32,
    /// Provider URL of the image
    pub image_url: Option<String>,
    /// Where the image was saved locally
    pub local_path: Option<String>,
    /// Saved file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Human-readable summary
    pub message: String,
    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageToolOutput {
    /// A successful generation record.
    pub fn succeeded(
        panel_id: u32,
        image_url: impl Into<String>,
        local_path: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            panel_id,
            image_url: Some(image_url.into()),
            local_path: Some(local_path.into()),
            filename: Some(filename.into()),
            message: format!("Successfully generated and saved image for panel {}", panel_id),
            error: None,
        }
    }

    /// A failed generation record.
    pub fn failed(panel_id: u32, error: impl Into<String>) -> Self {
        Self {
            success: false,
            panel_id,
            image_url: None,
            local_path: None,
            filename: None,
            message: format!("Failed to generate image for panel {}", panel_id),
            error: Some(error.into()),
        }
    }
}

/// Arguments for `generate_panel_audio`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioToolInput {
    /// Text to read aloud
    pub text: String,
    /// Narration language
    pub language: Language,
    /// Panel the audio is for
    pub panel_id: u32,
    /// Voice, `anushka` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<Speaker>,
}

/// Result of `generate_panel_audio`. Failures are records, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioToolOutput {
    /// Whether the provider call succeeded
    pub success: bool,
    /// Panel the audio is for
    pub panel_id: u32,
    /// Base64 WAV returned by the provider
    pub audio_base64: Option<String>,
    /// Where the WAV was saved locally
    pub local_path: Option<String>,
    /// Saved file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Human-readable summary
    pub message: String,
    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AudioToolOutput {
    /// A successful synthesis record. The provider may return no audio.
    pub fn succeeded(
        panel_id: u32,
        audio_base64: Option<String>,
        saved: Option<(String, String)>,
    ) -> Self {
        let (local_path, filename) = match saved {
            Some((path, name)) => (Some(path), Some(name)),
            None => (None, None),
        };
        Self {
            success: true,
            panel_id,
            audio_base64,
            local_path,
            filename,
            message: format!("Successfully generated and saved audio for panel {}", panel_id),
            error: None,
        }
    }

    /// A failed synthesis record.
    pub fn failed(panel_id: u32, error: impl Into<String>) -> Self {
        Self {
            success: false,
            panel_id,
            audio_base64: None,
            local_path: None,
            filename: None,
            message: format!("Failed to generate audio for panel {}", panel_id),
            error: Some(error.into()),
        }
    }
}
