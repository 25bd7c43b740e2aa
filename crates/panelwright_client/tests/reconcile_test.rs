//! Tests for panel reconciliation across event shapes.

use panelwright_client::{extract_image_urls, final_response, reconcile_events};
use panelwright_core::AudioSource;
use serde_json::{Value, json};

fn script_event(title: &str, ids: &[u64]) -> Value {
    let panels: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "panelId": id,
                "scene": format!("scene {}", id),
                "characters": "Hulk",
                "dialogue": format!("line {}", id),
                "narration": format!("narration {}", id),
            })
        })
        .collect();
    json!({
        "author": "script_generator",
        "actions": {"stateDelta": {"comic_script": {"title": title, "lesson": "kindness", "panels": panels}}}
    })
}

fn tool_response(name: &str, response: Value) -> Value {
    json!({
        "author": "image_generator",
        "content": {"role": "model", "parts": [{"functionResponse": {"id": "call_1", "name": name, "response": response}}]}
    })
}

#[test]
fn test_one_script_and_matching_media() {
    let mut events = vec![script_event("Hulk Helps", &[1, 2, 3])];
    for id in 1..=3 {
        events.push(tool_response(
            "generate_comic_image",
            json!({"success": true, "panelId": id, "imageUrl": format!("https://img/{}.png", id)}),
        ));
        events.push(tool_response(
            "generate_panel_audio",
            json!({"success": true, "panelId": id, "audioBase64": format!("QUFB{}", id)}),
        ));
    }

    let comic = reconcile_events(&events);
    assert_eq!(comic.title.as_deref(), Some("Hulk Helps"));
    assert_eq!(comic.panels.len(), 3);
    for (index, panel) in comic.panels.iter().enumerate() {
        let id = index + 1;
        assert_eq!(panel.panel_id as usize, id);
        assert_eq!(panel.image_url, Some(format!("https://img/{}.png", id)));
        assert_eq!(panel.audio, Some(AudioSource::Base64(format!("QUFB{}", id))));
        assert_eq!(panel.narration, format!("narration {}", id));
        assert_eq!(panel.image_prompt, format!("scene {}", id));
    }
}

#[test]
fn test_unknown_panel_entries_are_dropped() {
    let events = vec![
        script_event("Two Panels", &[1, 2]),
        json!({"actions": {"stateDelta": {"generated_images": [
            {"panelId": 2, "url": "https://img/2.png"},
            {"panelId": 7, "imageUrl": "https://img/7.png"}
        ]}}}),
        json!({"actions": {"stateDelta": {"generated_audio": [
            {"panelId": 9, "audioBase64": "AAAA"}
        ]}}}),
    ];

    let comic = reconcile_events(&events);
    assert_eq!(comic.panels.len(), 2);
    assert!(comic.panels[0].image_url.is_none());
    assert_eq!(comic.panels[1].image_url.as_deref(), Some("https://img/2.png"));
    assert!(comic.panels.iter().all(|panel| panel.audio.is_none()));
}

#[test]
fn test_second_script_replaces_first() {
    let events = vec![
        script_event("Draft", &[1, 2, 3, 4, 5]),
        json!({"actions": {"stateDelta": {"generated_images": [
            {"panelId": 5, "imageUrl": "https://img/5.png"}
        ]}}}),
        script_event("Final", &[1, 2]),
    ];

    let comic = reconcile_events(&events);
    assert_eq!(comic.title.as_deref(), Some("Final"));
    assert_eq!(
        comic.panels.iter().map(|p| p.panel_id).collect::<Vec<_>>(),
        vec![1, 2]
    );
}

#[test]
fn test_no_script_means_no_panels() {
    let events = vec![
        tool_response(
            "generate_comic_image",
            json!({"success": true, "panelId": 1, "imageUrl": "https://img/1.png"}),
        ),
        json!({"actions": {"stateDelta": {"generated_images": "Panel 1: Image URL: https://img/1.png"}}}),
    ];
    assert!(reconcile_events(&events).panels.is_empty());
}

#[test]
fn test_failed_tool_results_are_ignored() {
    let events = vec![
        script_event("Fails", &[1]),
        tool_response(
            "generate_comic_image",
            json!({"success": false, "panelId": 1, "imageUrl": null, "error": "timeout"}),
        ),
        tool_response(
            "some_other_tool",
            json!({"success": true, "panelId": 1, "imageUrl": "https://img/other.png"}),
        ),
    ];
    assert!(reconcile_events(&events).panels[0].image_url.is_none());
}

#[test]
fn test_markdown_image_text() {
    let text = "Here are your images:\n\n**Panel 1:**\n    *   **Image URL:** https://replicate.delivery/a/1.png\n\n**Panel 2:**\n    *   **Image URL:** https://replicate.delivery/b/2.png\n";
    let events = vec![
        script_event("Markdown", &[1, 2]),
        json!({"actions": {"stateDelta": {"generated_images": text}}}),
    ];

    let comic = reconcile_events(&events);
    assert_eq!(
        comic.panels[0].image_url.as_deref(),
        Some("https://replicate.delivery/a/1.png")
    );
    assert_eq!(
        comic.panels[1].image_url.as_deref(),
        Some("https://replicate.delivery/b/2.png")
    );
}

#[test]
fn test_regex_extraction_shapes() {
    assert_eq!(
        extract_image_urls("Panel 2: ... Image URL: https://x/y.png"),
        vec![(2, "https://x/y.png".to_string())]
    );
    assert_eq!(
        extract_image_urls("panel 3 done, url: http://cdn/3.png."),
        vec![(3, "http://cdn/3.png.".to_string())]
    );
    assert!(extract_image_urls("Panel: Image URL: https://x/y.png").is_empty());
    assert!(extract_image_urls("Panel two, Image URL: https://x/y.png").is_empty());
    assert!(extract_image_urls("Panel 4 has no link yet").is_empty());

    // A panel without a URL does not steal the next panel's link
    assert_eq!(
        extract_image_urls("Panel 1: failed. Panel 2: Image URL: https://x/2.png"),
        vec![(2, "https://x/2.png".to_string())]
    );
}

#[test]
fn test_panel_word_inside_url_does_not_split_link() {
    let text = "Panel 1: Thor lends his hammer. Image URL: https://cdn.example.com/comic/panel2.png\n\
                Panel 2: Loki says thanks. Image URL: https://cdn.example.com/comic/b.png";
    assert_eq!(
        extract_image_urls(text),
        vec![
            (1, "https://cdn.example.com/comic/panel2.png".to_string()),
            (2, "https://cdn.example.com/comic/b.png".to_string()),
        ]
    );

    let events = vec![
        json!({"actions": {"stateDelta": {"comic_script": {
            "title": "Borrowing",
            "panels": [
                {"panelId": 1, "scene": "Thor lends his hammer"},
                {"panelId": 2, "scene": "Loki says thanks"}
            ]
        }}}}),
        json!({"actions": {"stateDelta": {"generated_images": text}}}),
    ];
    let comic = reconcile_events(&events);
    assert_eq!(
        comic.panels[0].image_url.as_deref(),
        Some("https://cdn.example.com/comic/panel2.png")
    );
    assert_eq!(
        comic.panels[1].image_url.as_deref(),
        Some("https://cdn.example.com/comic/b.png")
    );
}

#[test]
fn test_script_and_images_from_json_text() {
    let script_text = json!({
        "title": "Text Script",
        "panels": [
            {"panelId": 1, "imagePrompt": "prompt one", "scene": "ignored", "dialogue": "Hi!"},
            {"panelId": "2", "scene": "scene two", "narration": "Later..."},
            {"panelId": 0, "scene": "invalid id"},
            {"panelId": 1.5, "scene": "invalid id"}
        ]
    })
    .to_string();
    let images_text = json!({"images": [{"panelId": 2, "url": "https://img/2.png"}]}).to_string();

    let events = vec![
        json!({"content": {"parts": [{"text": script_text}]}}),
        json!({"content": {"parts": [{"text": "not json"}, {"text": images_text}]}}),
    ];

    let comic = reconcile_events(&events);
    assert_eq!(comic.title.as_deref(), Some("Text Script"));
    assert_eq!(comic.panels.len(), 2);
    assert_eq!(comic.panels[0].image_prompt, "prompt one");
    assert_eq!(comic.panels[0].narration, "Hi!");
    assert_eq!(comic.panels[1].narration, "Later...");
    assert_eq!(comic.panels[1].image_url.as_deref(), Some("https://img/2.png"));
}

#[test]
fn test_script_delta_as_json_string() {
    let script = json!({"title": "Stringly", "panels": [{"panelId": 1, "scene": "s"}]}).to_string();
    let events = vec![
        json!({"actions": {"stateDelta": {"comic_script": script}}}),
        json!({"actions": {"stateDelta": {"generated_audio": [
            {"panelId": 1, "audio": "https://cdn/1.wav"}
        ]}}}),
    ];

    let comic = reconcile_events(&events);
    assert_eq!(comic.panels.len(), 1);
    assert_eq!(
        comic.panels[0].audio,
        Some(AudioSource::Url("https://cdn/1.wav".to_string()))
    );
}

#[test]
fn test_malformed_events_are_skipped() {
    let events = vec![
        json!(null),
        json!("a string event"),
        json!({"actions": {"stateDelta": "oops"}}),
        json!({"content": {"parts": "nope"}}),
        json!({"actions": {"stateDelta": {"comic_script": "{not json"}}}),
        script_event("Survivor", &[1]),
    ];
    let comic = reconcile_events(&events);
    assert_eq!(comic.panels.len(), 1);
}

#[test]
fn test_final_response_skips_textless_events() {
    let events = vec![
        json!({"content": {"parts": [{"text": "Hello there"}]}}),
        json!({"actions": {"stateDelta": {"x": 1}}}),
    ];
    assert_eq!(final_response(&events).as_deref(), Some("Hello there"));
    assert!(final_response(&[]).is_none());
}
