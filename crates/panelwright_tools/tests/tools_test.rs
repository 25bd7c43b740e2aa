//! Tests for the image and audio tools.

use async_trait::async_trait;
use panelwright_core::{
    AspectRatio, AudioToolInput, ImageRequest, ImageToolInput, Language, Resolution, Speaker,
    SpeechRequest, SynthesizedImage, SynthesizedSpeech,
};
use panelwright_error::{PanelwrightResult, ProviderError, ProviderErrorKind};
use panelwright_interface::{ComicTool, ImageSynthesizer, SpeechSynthesizer};
use panelwright_storage::LocalOutputDir;
use panelwright_tools::{GenerateAudioTool, GenerateImageTool, ToolRegistry};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Image synthesizer that records requests and returns a fixed result.
struct MockImages {
    fail: bool,
    requests: Arc<Mutex<Vec<ImageRequest>>>,
}

#[async_trait]
impl ImageSynthesizer for MockImages {
    async fn synthesize(&self, request: &ImageRequest) -> PanelwrightResult<SynthesizedImage> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(ProviderError::new(ProviderErrorKind::PredictionTimedOut(300)).into());
        }
        Ok(SynthesizedImage {
            url: "https://replicate.delivery/abc/output.png".to_string(),
            data: b"png".to_vec(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Speech synthesizer returning a fixed response.
struct MockSpeech {
    response: Result<Option<String>, u16>,
    requests: Arc<Mutex<Vec<SpeechRequest>>>,
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, request: &SpeechRequest) -> PanelwrightResult<SynthesizedSpeech> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.response {
            Ok(audio) => Ok(SynthesizedSpeech {
                audio_base64: audio.clone(),
            }),
            Err(status) => Err(ProviderError::new(ProviderErrorKind::Status {
                provider: "Sarvam".to_string(),
                status: *status,
                body: "quota exceeded".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

fn image_tool(temp_dir: &TempDir, fail: bool) -> (GenerateImageTool, Arc<Mutex<Vec<ImageRequest>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let synth = Arc::new(MockImages {
        fail,
        requests: requests.clone(),
    });
    (
        GenerateImageTool::new(synth, LocalOutputDir::new(temp_dir.path())),
        requests,
    )
}

fn audio_tool(
    temp_dir: &TempDir,
    response: Result<Option<String>, u16>,
) -> (GenerateAudioTool, Arc<Mutex<Vec<SpeechRequest>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let synth = Arc::new(MockSpeech {
        response,
        requests: requests.clone(),
    });
    (
        GenerateAudioTool::new(synth, LocalOutputDir::new(temp_dir.path())),
        requests,
    )
}

#[tokio::test]
async fn test_image_success_saves_png() {
    let temp_dir = TempDir::new().unwrap();
    let (tool, requests) = image_tool(&temp_dir, false);

    let output = tool
        .execute(ImageToolInput {
            prompt: "Iron Man sharing cookies, comic style".to_string(),
            panel_id: 2,
            aspect_ratio: None,
            resolution: None,
        })
        .await;

    assert!(output.success);
    assert_eq!(output.panel_id, 2);
    assert_eq!(
        output.image_url.as_deref(),
        Some("https://replicate.delivery/abc/output.png")
    );
    assert_eq!(
        output.message,
        "Successfully generated and saved image for panel 2"
    );
    let local_path = output.local_path.unwrap();
    assert_eq!(std::fs::read(&local_path).unwrap(), b"png");
    assert!(output.filename.unwrap().starts_with("panel_2_"));

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].aspect_ratio, AspectRatio::Landscape);
    assert_eq!(requests[0].resolution, Resolution::TwoK);
}

#[tokio::test]
async fn test_image_failure_is_a_record() {
    let temp_dir = TempDir::new().unwrap();
    let (tool, _) = image_tool(&temp_dir, true);

    let output = tool
        .execute(ImageToolInput {
            prompt: "anything".to_string(),
            panel_id: 3,
            aspect_ratio: Some(AspectRatio::Square),
            resolution: Some(Resolution::OneK),
        })
        .await;

    assert!(!output.success);
    assert!(output.image_url.is_none());
    assert!(output.local_path.is_none());
    assert_eq!(output.message, "Failed to generate image for panel 3");
    assert_eq!(
        output.error.as_deref(),
        Some("Prediction timed out after 300 seconds")
    );
}

#[tokio::test]
async fn test_image_call_with_json_arguments() {
    let temp_dir = TempDir::new().unwrap();
    let (tool, requests) = image_tool(&temp_dir, false);

    let result = tool
        .call(json!({"prompt": "a hero", "panelId": 1, "aspectRatio": "16:9"}))
        .await;
    assert_eq!(result["success"], true);
    assert_eq!(result["panelId"], 1);
    assert_eq!(requests.lock().unwrap()[0].aspect_ratio, AspectRatio::Wide);

    let invalid = tool.call(json!({"panelId": 4})).await;
    assert_eq!(invalid["success"], false);
    assert_eq!(invalid["panelId"], 4);
    assert!(invalid["error"].as_str().unwrap().contains("Invalid arguments"));
}

#[tokio::test]
async fn test_audio_success_saves_wav() {
    let temp_dir = TempDir::new().unwrap();
    let (tool, requests) = audio_tool(&temp_dir, Ok(Some("UklGRg==".to_string())));

    let output = tool
        .execute(AudioToolInput {
            text: "Tony smiled. Let's share!".to_string(),
            language: Language::Hindi,
            panel_id: 1,
            speaker: None,
        })
        .await;

    assert!(output.success);
    assert_eq!(output.audio_base64.as_deref(), Some("UklGRg=="));
    assert_eq!(output.message, "Successfully generated and saved audio for panel 1");
    assert_eq!(std::fs::read(output.local_path.unwrap()).unwrap(), b"RIFF");

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].speaker, Speaker::Anushka);
    assert_eq!(requests[0].language, Language::Hindi);
}

#[tokio::test]
async fn test_audio_without_payload_has_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let (tool, _) = audio_tool(&temp_dir, Ok(None));

    let result = tool
        .call(json!({"text": "hello", "language": "en-IN", "panelId": 2, "speaker": "karun"}))
        .await;

    assert_eq!(result["success"], true);
    assert!(result["audioBase64"].is_null());
    assert!(result["localPath"].is_null());
}

#[tokio::test]
async fn test_audio_provider_error_message() {
    let temp_dir = TempDir::new().unwrap();
    let (tool, _) = audio_tool(&temp_dir, Err(429));

    let output = tool
        .execute(AudioToolInput {
            text: "hello".to_string(),
            language: Language::English,
            panel_id: 5,
            speaker: Some(Speaker::Vidya),
        })
        .await;

    assert!(!output.success);
    assert_eq!(output.message, "Failed to generate audio for panel 5");
    assert_eq!(
        output.error.as_deref(),
        Some("Sarvam API error: 429 - quota exceeded")
    );
}

#[tokio::test]
async fn test_registry_dispatch() {
    let temp_dir = TempDir::new().unwrap();
    let (image, _) = image_tool(&temp_dir, false);
    let (audio, _) = audio_tool(&temp_dir, Ok(None));

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(image));
    registry.register(Arc::new(audio));

    assert_eq!(
        registry.names(),
        vec!["generate_comic_image", "generate_panel_audio"]
    );
    let definitions = registry.definitions();
    assert_eq!(definitions[1].parameters["required"][1], "language");

    let result = registry
        .call("generate_panel_audio", json!({"text": "hi", "language": "ta-IN", "panelId": 1}))
        .await;
    assert_eq!(result["success"], true);

    let unknown = registry.call("draw_map", json!({})).await;
    assert_eq!(unknown["success"], false);
}
