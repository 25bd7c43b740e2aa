//! Replicate-hosted image model client.

use async_trait::async_trait;
use panelwright_config::ImageSettings;
use panelwright_core::{ImageRequest, SynthesizedImage};
use panelwright_error::{PanelwrightResult, ProviderError, ProviderErrorKind};
use panelwright_interface::ImageSynthesizer;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::{Duration, Instant};
use tracing::instrument;

const PROVIDER: &str = "Replicate";
const DEFAULT_BASE_URL: &str = "https://api.replicate.com";

/// Prediction resource returned by the Replicate API.
#[derive(Debug, Clone, Deserialize)]
struct Prediction {
    #[serde(default)]
    id: String,
    status: String,
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    urls: Option<PredictionUrls>,
}

#[derive(Debug, Clone, Deserialize)]
struct PredictionUrls {
    get: Option<String>,
}

impl Prediction {
    fn is_finished(&self) -> bool {
        matches!(self.status.as_str(), "succeeded" | "failed" | "canceled")
    }

    /// First URL in the output, which may be a string or a list of strings.
    fn output_url(&self) -> Option<String> {
        match self.output.as_ref()? {
            Value::String(url) => Some(url.clone()),
            Value::Array(items) => items.iter().find_map(|v| v.as_str().map(str::to_string)),
            _ => None,
        }
    }
}

/// Client for a Replicate text-to-image model.
///
/// Creates a prediction with `Prefer: wait`, polls it until it finishes if
/// the synchronous window runs out, then downloads the image. Each call is a
/// single prediction; nothing is retried.
#[derive(Debug, Clone)]
pub struct ReplicateClient {
    http: reqwest::Client,
    api_token: String,
    base_url: String,
    settings: ImageSettings,
}

impl ReplicateClient {
    /// Create a client, reading the token from `REPLICATE_API_TOKEN`.
    pub fn new(settings: ImageSettings) -> PanelwrightResult<Self> {
        let api_token = std::env::var("REPLICATE_API_TOKEN").map_err(|_| {
            ProviderError::new(ProviderErrorKind::MissingCredentials(
                "REPLICATE_API_TOKEN".to_string(),
            ))
        })?;
        Ok(Self::with_token(api_token, settings))
    }

    /// Create a client with an explicit token.
    pub fn with_token(api_token: impl Into<String>, settings: ImageSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            settings,
        }
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn request_error(message: impl std::fmt::Display) -> ProviderError {
        ProviderError::new(ProviderErrorKind::Request {
            provider: PROVIDER.to_string(),
            message: message.to_string(),
        })
    }

    async fn read_prediction(response: reqwest::Response) -> Result<Prediction, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Replicate returned error");
            return Err(ProviderError::new(ProviderErrorKind::Status {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                body,
            }));
        }

        response.json::<Prediction>().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::InvalidResponse {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })
        })
    }

    #[instrument(skip(self, request), fields(model = %self.settings.model))]
    async fn create_prediction(&self, request: &ImageRequest) -> Result<Prediction, ProviderError> {
        let url = format!(
            "{}/v1/models/{}/predictions",
            self.base_url, self.settings.model
        );
        let body = json!({
            "input": {
                "prompt": request.prompt,
                "resolution": request.resolution.to_string(),
                "aspect_ratio": request.aspect_ratio.to_string(),
                "output_format": self.settings.output_format,
                "safety_filter_level": self.settings.safety_filter_level,
            }
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(Self::request_error)?;

        Self::read_prediction(response).await
    }

    #[instrument(skip(self, prediction), fields(id = %prediction.id))]
    async fn wait_for(&self, mut prediction: Prediction) -> Result<Prediction, ProviderError> {
        if prediction.is_finished() {
            return Ok(prediction);
        }

        // Poll bodies may omit `urls`; the created prediction's status URL stays valid.
        let Some(get_url) = prediction.urls.as_ref().and_then(|u| u.get.clone()) else {
            return Err(ProviderError::new(ProviderErrorKind::InvalidResponse {
                provider: PROVIDER.to_string(),
                message: format!("prediction {} has no status URL", prediction.id),
            }));
        };

        let started = Instant::now();
        let timeout = Duration::from_secs(self.settings.timeout_secs);
        let interval = Duration::from_millis(self.settings.poll_interval_ms);

        while !prediction.is_finished() {
            if started.elapsed() >= timeout {
                return Err(ProviderError::new(ProviderErrorKind::PredictionTimedOut(
                    self.settings.timeout_secs,
                )));
            }

            tokio::time::sleep(interval).await;
            tracing::debug!(status = %prediction.status, "Polling prediction");

            let response = self
                .http
                .get(&get_url)
                .bearer_auth(&self.api_token)
                .send()
                .await
                .map_err(Self::request_error)?;
            prediction = Self::read_prediction(response).await?;
        }

        Ok(prediction)
    }

    #[instrument(skip(self))]
    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::new(ProviderErrorKind::Download(e.to_string())))?;

        if !response.status().is_success() {
            return Err(ProviderError::new(ProviderErrorKind::Download(format!(
                "{} returned {}",
                url,
                response.status()
            ))));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::new(ProviderErrorKind::Download(e.to_string())))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageSynthesizer for ReplicateClient {
    #[instrument(skip(self, request), fields(prompt_length = request.prompt.len()))]
    async fn synthesize(&self, request: &ImageRequest) -> PanelwrightResult<SynthesizedImage> {
        let prediction = self.create_prediction(request).await?;
        let prediction = self.wait_for(prediction).await?;

        if prediction.status != "succeeded" {
            let reason = prediction
                .error
                .as_ref()
                .map(|e| match e {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_else(|| prediction.status.clone());
            return Err(ProviderError::new(ProviderErrorKind::PredictionFailed(reason)).into());
        }

        let url = prediction.output_url().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::MissingOutput(format!(
                "prediction {} has no image URL",
                prediction.id
            )))
        })?;

        let data = self.download(&url).await?;
        tracing::info!(url = %url, size = data.len(), "Image generated");

        Ok(SynthesizedImage { url, data })
    }

    fn provider_name(&self) -> &'static str {
        "replicate"
    }
}
