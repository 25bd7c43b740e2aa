//! Requests and results exchanged with media providers.

use crate::{AspectRatio, Language, Resolution, Speaker};

/// A fully resolved image synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Text-to-image prompt
    pub prompt: String,
    /// Aspect ratio
    pub aspect_ratio: AspectRatio,
    /// Resolution
    pub resolution: Resolution,
}

/// An image returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedImage {
    /// Where the provider hosts the image
    pub url: String,
    /// Downloaded image bytes
    pub data: Vec<u8>,
}

/// A fully resolved speech synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    /// Text to read aloud
    pub text: String,
    /// Target language
    pub language: Language,
    /// Voice
    pub speaker: Speaker,
}

/// Speech returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedSpeech {
    /// Base64 WAV, absent when the provider returned none
    pub audio_base64: Option<String>,
}
