//! Trait definitions for model backends and tools.

use crate::ToolDefinition;
use async_trait::async_trait;
use panelwright_core::{
    GenerateRequest, GenerateResponse, ImageRequest, SpeechRequest, SynthesizedImage,
    SynthesizedSpeech,
};
use panelwright_error::PanelwrightResult;
use serde_json::Value;

/// Core trait that all language model backends implement.
#[async_trait]
pub trait ComicDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> PanelwrightResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model used when a request names none.
    fn model_name(&self) -> &str;
}

/// A hosted text-to-image model.
#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    /// Generate one image and download it. Single attempt, no retry.
    async fn synthesize(&self, request: &ImageRequest) -> PanelwrightResult<SynthesizedImage>;

    /// Provider name (e.g., "replicate").
    fn provider_name(&self) -> &'static str;
}

/// A hosted text-to-speech model.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize speech for one piece of text. Single attempt, no retry.
    async fn synthesize(&self, request: &SpeechRequest) -> PanelwrightResult<SynthesizedSpeech>;

    /// Provider name (e.g., "sarvam").
    fn provider_name(&self) -> &'static str;
}

/// A function-calling tool with a JSON contract.
///
/// `call` never fails: bad arguments and provider failures come back as a
/// result record with `success: false`.
#[async_trait]
pub trait ComicTool: Send + Sync {
    /// Name, description and parameter schema.
    fn definition(&self) -> ToolDefinition;

    /// Run the tool with loosely-typed arguments and return its result record.
    async fn call(&self, args: Value) -> Value;
}
