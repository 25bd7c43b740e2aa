//! Test application with scripted model and media providers.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use panelwright_core::{
    GenerateRequest, GenerateResponse, ImageRequest, Output, SpeechRequest, SynthesizedImage,
    SynthesizedSpeech,
};
use panelwright_error::{GeminiError, GeminiErrorKind, PanelwrightResult};
use panelwright_interface::{ComicDriver, ImageSynthesizer, SpeechSynthesizer};
use panelwright_pipeline::{
    ComicPipeline, ComicRunner, Instructions, RequirementsAgent, SessionStore,
};
use panelwright_server::{AppState, create_router};
use panelwright_storage::LocalOutputDir;
use panelwright_tools::{GenerateAudioTool, GenerateImageTool};
use serde_json::Value;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Driver answering with queued responses.
#[derive(Clone, Default)]
pub struct ScriptedDriver {
    responses: Arc<Mutex<VecDeque<String>>>,
}

impl ScriptedDriver {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Arc::new(Mutex::new(
                responses.iter().map(|r| r.to_string()).collect(),
            )),
        }
    }
}

#[async_trait]
impl ComicDriver for ScriptedDriver {
    async fn generate(&self, _req: &GenerateRequest) -> PanelwrightResult<GenerateResponse> {
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

#[derive(Clone, Default)]
pub struct MockImages;

#[async_trait]
impl ImageSynthesizer for MockImages {
    async fn synthesize(&self, request: &ImageRequest) -> PanelwrightResult<SynthesizedImage> {
        Ok(SynthesizedImage {
            url: format!("https://replicate.delivery/mock/{}.png", request.prompt.len()),
            data: b"png".to_vec(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

#[derive(Clone, Default)]
pub struct MockSpeech;

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, _request: &SpeechRequest) -> PanelwrightResult<SynthesizedSpeech> {
        Ok(SynthesizedSpeech {
            audio_base64: Some("UklGRg==".to_string()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

pub const CONFIRMED: &str = "Creating your comic now!\n```json\n{\"lesson\": \"honesty\", \"childAge\": 5, \"language\": \"hi-IN\", \"panelCount\": 2, \"theme\": \"avengers\"}\n```";

pub const SCRIPT: &str = r#"{"title": "Thor Tells the Truth", "lesson": "honesty", "panels": [
  {"panelId": 1, "scene": "Thor next to a broken vase", "characters": "Thor", "dialogue": "Oops.", "narration": "Thor broke a vase."},
  {"panelId": 2, "scene": "Thor talking to Odin", "characters": "Thor, Odin", "dialogue": "It was me.", "narration": "He told the truth."}
]}"#;

pub const PROMPTS: &str = r#"{"artStyle": "Bright comic", "prompts": [
  {"panelId": 1, "prompt": "Thor beside a broken vase"},
  {"panelId": 2, "prompt": "Thor speaking with Odin"}
]}"#;

/// Router over a fresh session store.
pub fn app(responses: &[&str], output: &Path) -> Router {
    let driver: Arc<dyn ComicDriver> = Arc::new(ScriptedDriver::new(responses));
    let instructions = Instructions::bundled().unwrap();
    let output = LocalOutputDir::new(output);

    let agent = RequirementsAgent::new(driver.clone(), instructions.requirements().clone());
    let pipeline = ComicPipeline::new(
        driver,
        GenerateImageTool::new(Arc::new(MockImages), output.clone()),
        GenerateAudioTool::new(Arc::new(MockSpeech), output),
        instructions,
    );
    let runner = ComicRunner::new(agent, pipeline, Arc::new(SessionStore::new()));
    create_router(AppState::new(runner))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<axum::body::Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
