//! Tests for the Sarvam client against a local stand-in API.

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use panelwright_config::{PanelwrightConfig, SpeechSettings};
use panelwright_core::{Language, Speaker, SpeechRequest};
use panelwright_interface::SpeechSynthesizer;
use panelwright_models::SarvamClient;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

async fn serve(router: Router) -> SpeechSettings {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let mut settings = PanelwrightConfig::defaults().unwrap().speech;
    settings.endpoint = format!("{}/text-to-speech", base);
    settings
}

fn request() -> SpeechRequest {
    SpeechRequest {
        text: "Maya shared her toys.".to_string(),
        language: Language::Hindi,
        speaker: Speaker::Vidya,
    }
}

#[tokio::test]
async fn test_speech_request_shape_and_first_audio() {
    let captured: Arc<Mutex<Option<(Value, Option<String>)>>> = Arc::new(Mutex::new(None));
    let capture = captured.clone();

    let router = Router::new().route(
        "/text-to-speech",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let capture = capture.clone();
            async move {
                let key = headers
                    .get("api-subscription-key")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *capture.lock().unwrap() = Some((body, key));
                Json(json!({"request_id": "r1", "audios": ["UklGRg==", "ignored"]}))
            }
        }),
    );
    let settings = serve(router).await;

    let client = SarvamClient::with_api_key("sk_test", settings);
    let speech = client.synthesize(&request()).await.unwrap();
    assert_eq!(speech.audio_base64.as_deref(), Some("UklGRg=="));

    let (body, key) = captured.lock().unwrap().clone().unwrap();
    assert_eq!(key.as_deref(), Some("sk_test"));
    assert_eq!(body["inputs"], json!(["Maya shared her toys."]));
    assert_eq!(body["target_language_code"], "hi-IN");
    assert_eq!(body["speaker"], "vidya");
    assert_eq!(body["model"], "bulbul:v2");
    assert_eq!(body["pace"], 1.0);
    assert_eq!(body["enable_preprocessing"], true);
}

#[tokio::test]
async fn test_empty_audio_list_is_not_an_error() {
    let router = Router::new().route(
        "/text-to-speech",
        post(|| async { Json(json!({"audios": []})) }),
    );
    let settings = serve(router).await;

    let client = SarvamClient::with_api_key("sk_test", settings);
    let speech = client.synthesize(&request()).await.unwrap();
    assert!(speech.audio_base64.is_none());
}

#[tokio::test]
async fn test_error_status_includes_body() {
    let router = Router::new().route(
        "/text-to-speech",
        post(|| async { (StatusCode::BAD_REQUEST, "text too long") }),
    );
    let settings = serve(router).await;

    let client = SarvamClient::with_api_key("sk_test", settings);
    let err = client.synthesize(&request()).await.unwrap_err();
    assert!(format!("{}", err).contains("Sarvam API error: 400 - text too long"));
}
