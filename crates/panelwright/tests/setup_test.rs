//! Wiring tests: configuration flows into tools, pipeline and storage.

use async_trait::async_trait;
use panelwright::{
    AudioSource, ComicDriver, EventLog, GenerateRequest, GenerateResponse, ImageRequest,
    ImageSynthesizer, Output, Panel, PanelwrightConfig, PanelwrightResult, Requirements,
    SpeechRequest, SpeechSynthesizer, SynthesizedImage, SynthesizedSpeech, build_runner_with,
    media_persister,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Default)]
struct ScriptedDriver {
    responses: Mutex<VecDeque<String>>,
    models: Mutex<Vec<Option<String>>>,
}

#[async_trait]
impl ComicDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> PanelwrightResult<GenerateResponse> {
        self.models.lock().unwrap().push(req.model().clone());
        let text = self.responses.lock().unwrap().pop_front().unwrap_or_default();
        Ok(GenerateResponse {
            outputs: vec![Output::Text(text)],
        })
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

#[derive(Default)]
struct RecordingImages {
    requests: Mutex<Vec<ImageRequest>>,
}

#[async_trait]
impl ImageSynthesizer for RecordingImages {
    async fn synthesize(&self, request: &ImageRequest) -> PanelwrightResult<SynthesizedImage> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(SynthesizedImage {
            url: "https://replicate.delivery/mock/1.png".to_string(),
            data: b"png".to_vec(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

#[derive(Default)]
struct RecordingSpeech {
    requests: Mutex<Vec<SpeechRequest>>,
}

#[async_trait]
impl SpeechSynthesizer for RecordingSpeech {
    async fn synthesize(&self, request: &SpeechRequest) -> PanelwrightResult<SynthesizedSpeech> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(SynthesizedSpeech {
            audio_base64: Some("UklGRg==".to_string()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

const SCRIPT: &str = r#"{"title": "Hulk Says Sorry", "lesson": "apologizing", "panels": [
  {"panelId": 1, "scene": "Hulk knocks over a tower of blocks", "characters": "Hulk", "dialogue": "Oh no.", "narration": "Hulk was too strong."}
]}"#;

const PROMPTS: &str = r#"{"artStyle": "Soft watercolor", "prompts": [
  {"panelId": 1, "prompt": "Hulk beside fallen toy blocks"}
]}"#;

fn config(temp_dir: &TempDir) -> PanelwrightConfig {
    let output = temp_dir.path().join("output");
    let storage = temp_dir.path().join("storage");
    PanelwrightConfig::from_toml_layers(&[&format!(
        "[agent]\nstage_model = \"stage-model\"\n\n[image]\naspect_ratio = \"1:1\"\n\n[speech]\nspeaker = \"karun\"\n\n[output]\ndir = {:?}\n\n[storage]\nroot = {:?}\n",
        output.display().to_string(),
        storage.display().to_string()
    )])
    .unwrap()
}

#[tokio::test]
async fn test_runner_uses_configured_models_and_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir);

    let driver = Arc::new(ScriptedDriver::default());
    driver
        .responses
        .lock()
        .unwrap()
        .extend([SCRIPT.to_string(), PROMPTS.to_string()]);
    let images = Arc::new(RecordingImages::default());
    let speech = Arc::new(RecordingSpeech::default());

    let runner =
        build_runner_with(&config, driver.clone(), images.clone(), speech.clone()).unwrap();
    let requirements: Requirements = serde_json::from_str(
        r#"{"lesson":"apologizing","childAge":4,"language":"ta-IN","panelCount":1}"#,
    )
    .unwrap();

    let context = runner
        .pipeline()
        .execute("inv_1", &requirements, &EventLog::new())
        .await
        .unwrap();
    let comic = context.assemble();
    assert_eq!(comic.title, "Hulk Says Sorry");
    assert_eq!(comic.panels.len(), 1);

    let models = driver.models.lock().unwrap().clone();
    assert!(models.iter().all(|m| m.as_deref() == Some("stage-model")));

    let image_requests = images.requests.lock().unwrap().clone();
    assert_eq!(image_requests.len(), 1);
    assert_eq!(image_requests[0].aspect_ratio.to_string(), "1:1");

    let speech_requests = speech.requests.lock().unwrap().clone();
    assert_eq!(speech_requests[0].speaker.to_string(), "karun");
    assert_eq!(speech_requests[0].language.code(), "ta-IN");

    let images_dir = temp_dir.path().join("output").join("images");
    assert_eq!(std::fs::read_dir(images_dir).unwrap().count(), 1);
}

#[tokio::test]
async fn test_media_persister_uses_configured_buckets() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir);
    let persister = media_persister(&config).unwrap();

    let panel = Panel {
        panel_id: 3,
        audio: Some(AudioSource::Base64("data:audio/wav;base64,UklGRg==".to_string())),
        ..Default::default()
    };
    let panels = persister
        .persist_panels(Some("user_abc"), "comic_1", vec![panel])
        .await;

    match &panels[0].audio {
        Some(AudioSource::Url(url)) => assert!(url.ends_with("comic-audio/user_abc/comic_1/panel_3.wav")),
        other => panic!("Expected hosted audio, got {:?}", other),
    }
    let stored = temp_dir
        .path()
        .join("storage/comic-audio/user_abc/comic_1/panel_3.wav");
    assert_eq!(std::fs::read(stored).unwrap(), b"RIFF");
}
