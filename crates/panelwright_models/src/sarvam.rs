//! Sarvam AI text-to-speech client.

use async_trait::async_trait;
use panelwright_config::SpeechSettings;
use panelwright_core::{SpeechRequest, SynthesizedSpeech};
use panelwright_error::{PanelwrightResult, ProviderError, ProviderErrorKind};
use panelwright_interface::SpeechSynthesizer;
use serde::{Deserialize, Serialize};
use tracing::instrument;

const PROVIDER: &str = "Sarvam";

#[derive(Debug, Serialize)]
struct TextToSpeechBody<'a> {
    inputs: Vec<&'a str>,
    target_language_code: &'a str,
    speaker: String,
    model: &'a str,
    pitch: f32,
    pace: f32,
    loudness: f32,
    enable_preprocessing: bool,
}

#[derive(Debug, Deserialize)]
struct TextToSpeechResponse {
    #[serde(default)]
    audios: Vec<String>,
}

/// Client for the Sarvam text-to-speech endpoint.
#[derive(Debug, Clone)]
pub struct SarvamClient {
    http: reqwest::Client,
    api_key: String,
    settings: SpeechSettings,
}

impl SarvamClient {
    /// Create a client, reading the key from `SARVAM_API_KEY`.
    pub fn new(settings: SpeechSettings) -> PanelwrightResult<Self> {
        let api_key = std::env::var("SARVAM_API_KEY").map_err(|_| {
            ProviderError::new(ProviderErrorKind::MissingCredentials(
                "SARVAM_API_KEY".to_string(),
            ))
        })?;
        Ok(Self::with_api_key(api_key, settings))
    }

    /// Create a client with an explicit key.
    pub fn with_api_key(api_key: impl Into<String>, settings: SpeechSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            settings,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for SarvamClient {
    #[instrument(skip(self, request), fields(language = %request.language, speaker = %request.speaker, text_length = request.text.len()))]
    async fn synthesize(&self, request: &SpeechRequest) -> PanelwrightResult<SynthesizedSpeech> {
        let body = TextToSpeechBody {
            inputs: vec![request.text.as_str()],
            target_language_code: request.language.code(),
            speaker: request.speaker.to_string(),
            model: &self.settings.model,
            pitch: self.settings.pitch,
            pace: self.settings.pace,
            loudness: self.settings.loudness,
            enable_preprocessing: self.settings.enable_preprocessing,
        };

        let response = self
            .http
            .post(&self.settings.endpoint)
            .header("api-subscription-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Request {
                    provider: PROVIDER.to_string(),
                    message: e.to_string(),
                })
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Sarvam returned error");
            return Err(ProviderError::new(ProviderErrorKind::Status {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                body,
            })
            .into());
        }

        let parsed: TextToSpeechResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::InvalidResponse {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })
        })?;

        let audio_base64 = parsed.audios.into_iter().next();
        if audio_base64.is_none() {
            tracing::warn!("Sarvam returned no audio");
        }

        Ok(SynthesizedSpeech { audio_base64 })
    }

    fn provider_name(&self) -> &'static str {
        "sarvam"
    }
}
