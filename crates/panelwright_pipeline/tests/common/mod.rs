//! Scripted drivers and providers for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use panelwright_core::{
    GenerateRequest, GenerateResponse, ImageRequest, Output, SpeechRequest, SynthesizedImage,
    SynthesizedSpeech,
};
use panelwright_error::{GeminiError, GeminiErrorKind, PanelwrightResult, ProviderError, ProviderErrorKind};
use panelwright_interface::{ComicDriver, ImageSynthesizer, SpeechSynthesizer};
use panelwright_pipeline::{ComicPipeline, Instructions};
use panelwright_storage::LocalOutputDir;
use panelwright_tools::{GenerateAudioTool, GenerateImageTool};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Driver that answers with queued responses and records every request.
#[derive(Clone, Default)]
pub struct ScriptedDriver {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl ScriptedDriver {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Arc::new(Mutex::new(
                responses.iter().map(|r| r.to_string()).collect(),
            )),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, response: &str) {
        self.responses.lock().unwrap().push_back(response.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ComicDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> PanelwrightResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(text) => Ok(GenerateResponse {
                outputs: vec![Output::Text(text)],
            }),
            None => Err(GeminiError::new(GeminiErrorKind::EmptyResponse).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Image provider that succeeds except for listed prompts.
#[derive(Clone, Default)]
pub struct MockImages {
    pub calls: Arc<Mutex<usize>>,
    pub fail_containing: Option<String>,
}

#[async_trait]
impl ImageSynthesizer for MockImages {
    async fn synthesize(&self, request: &ImageRequest) -> PanelwrightResult<SynthesizedImage> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        let blocked = self
            .fail_containing
            .as_deref()
            .is_some_and(|marker| request.prompt.contains(marker));
        if blocked {
            return Err(ProviderError::new(ProviderErrorKind::PredictionFailed(
                "NSFW content detected".to_string(),
            ))
            .into());
        }
        Ok(SynthesizedImage {
            url: format!("https://replicate.delivery/mock/{}.png", call),
            data: b"png".to_vec(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Speech provider returning a tiny WAV header.
#[derive(Clone, Default)]
pub struct MockSpeech {
    pub requests: Arc<Mutex<Vec<SpeechRequest>>>,
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, request: &SpeechRequest) -> PanelwrightResult<SynthesizedSpeech> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(SynthesizedSpeech {
            audio_base64: Some("UklGRg==".to_string()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

pub const SCRIPT_RESPONSE: &str = r#"Here is your script:
```json
{
  "title": "The Shield We Share",
  "lesson": "sharing",
  "panels": [
    {"panelId": 1, "scene": "Captain America polishing his shield in a sunny park", "characters": "Captain America", "dialogue": "This shield is my favorite thing.", "narration": "Steve loved his shield."},
    {"panelId": 2, "scene": "Spider-Man swinging in, looking at the shield", "characters": ["Spider-Man", "Captain America"], "dialogue": "Can I try it?", "narration": "Peter had never held a shield."},
    {"panelId": 5, "scene": "Steve handing the shield over with a smile", "characters": "Captain America, Spider-Man", "dialogue": "Let's take turns.", "narration": "Steve remembered how it felt to be new."},
    {"panelId": 9, "scene": "Both heroes laughing, shield between them", "characters": "Captain America, Spider-Man", "dialogue": "", "narration": "Sharing made the day twice as fun."}
  ]
}
```"#;

pub const PROMPTS_RESPONSE: &str = r#"{"artStyle": "Bright children's comic style", "prompts": [
  {"panelId": 1, "prompt": "Captain America in blue suit polishing a round shield, sunny park"},
  {"panelId": 2, "prompt": "Spider-Man in red and blue suit swinging toward Captain America"},
  {"panelId": 3, "prompt": "Captain America handing his shield to Spider-Man"}
]}"#;

pub fn pipeline(
    driver: ScriptedDriver,
    images: MockImages,
    speech: MockSpeech,
    output: &Path,
) -> ComicPipeline {
    let output = LocalOutputDir::new(output);
    ComicPipeline::new(
        Arc::new(driver),
        GenerateImageTool::new(Arc::new(images), output.clone()),
        GenerateAudioTool::new(Arc::new(speech), output),
        Instructions::bundled().unwrap(),
    )
    .with_stage_model("gemini-2.5-flash")
}
