//! Tests for event and tool record wire formats.

use panelwright_core::{
    AgentEvent, AudioSource, AudioToolOutput, FunctionResponse, ImageToolInput, ImageToolOutput,
    Panel,
};
use serde_json::json;

#[test]
fn test_event_parses_backend_shape() {
    let wire = json!({
        "id": "evt-1",
        "invocationId": "inv-1",
        "author": "image_generator",
        "timestamp": 1736900000.25,
        "content": {
            "role": "model",
            "parts": [{
                "functionResponse": {
                    "id": "call-1",
                    "name": "generate_comic_image",
                    "response": {"success": true, "panelId": 1, "imageUrl": "https://x/1.png"}
                }
            }]
        },
        "actions": {"stateDelta": {}}
    });

    let event: AgentEvent = serde_json::from_value(wire).unwrap();
    let part = &event.content.unwrap().parts[0];
    let response = part.function_response.as_ref().unwrap();
    assert_eq!(response.name, "generate_comic_image");
    assert_eq!(response.response["panelId"], 1);
}

#[test]
fn test_event_tolerates_missing_fields() {
    let event: AgentEvent = serde_json::from_value(json!({})).unwrap();
    assert!(event.content.is_none());
    assert!(event.actions.state_delta.is_empty());
}

#[test]
fn test_user_events_use_user_role() {
    let event = AgentEvent::new("inv", "user").with_text("hello");
    assert_eq!(event.content.unwrap().role, "user");

    let event = AgentEvent::new("inv", "tts_generator").with_function_response(FunctionResponse {
        id: "c".to_string(),
        name: "generate_panel_audio".to_string(),
        response: json!({"success": true}),
    });
    assert_eq!(event.content.unwrap().role, "model");
}

#[test]
fn test_image_input_defaults_are_optional() {
    let input: ImageToolInput =
        serde_json::from_value(json!({"prompt": "a park", "panelId": 2})).unwrap();
    assert!(input.aspect_ratio.is_none());
    assert!(input.resolution.is_none());

    let input: ImageToolInput = serde_json::from_value(
        json!({"prompt": "a park", "panelId": 2, "aspectRatio": "16:9", "resolution": "1K"}),
    )
    .unwrap();
    assert_eq!(input.aspect_ratio.unwrap().to_string(), "16:9");
    assert_eq!(input.resolution.unwrap().to_string(), "1K");
}

#[test]
fn test_successful_image_record_shape() {
    let record = ImageToolOutput::succeeded(
        2,
        "https://replicate.delivery/x.png",
        "output/images/panel_2_1.png",
        "panel_2_1.png",
    );
    let wire = serde_json::to_value(&record).unwrap();
    assert_eq!(wire["success"], true);
    assert_eq!(wire["filename"], "panel_2_1.png");
    assert_eq!(
        wire["message"],
        "Successfully generated and saved image for panel 2"
    );
    assert!(wire.get("error").is_none());
}

#[test]
fn test_audio_record_without_audio_has_null_path() {
    let record = AudioToolOutput::succeeded(4, None, None);
    let wire = serde_json::to_value(&record).unwrap();
    assert!(wire["audioBase64"].is_null());
    assert!(wire["localPath"].is_null());
    assert_eq!(wire["message"], "Successfully generated and saved audio for panel 4");
}

#[test]
fn test_panel_audio_serializes_as_string() {
    let panel = Panel {
        panel_id: 1,
        audio: Some(AudioSource::Url("https://store/a.wav".to_string())),
        ..Default::default()
    };
    let wire = serde_json::to_value(&panel).unwrap();
    assert_eq!(wire["audio"], "https://store/a.wav");

    let back: Panel = serde_json::from_value(wire).unwrap();
    assert!(back.audio.unwrap().is_url());
}
