//! Rebuilding panels from heterogeneous backend events.
//!
//! The same logical data reaches the client in several shapes: a script in a
//! state delta or as JSON text, image URLs as structured arrays, as markdown
//! text, or as tool results. No shape is treated as canonical. Every source
//! feeds one of three collections keyed by panel id, and the panel list is
//! assembled once the scan is done.

use panelwright_core::{AudioSource, Panel};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

const IMAGE_TOOL: &str = "generate_comic_image";
const AUDIO_TOOL: &str = "generate_panel_audio";

static PANEL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Panel\s*(\d+)").expect("Valid panel marker regex"));

static LABELLED_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:Image URL:|URL:)[*_\s]*(https?://[^\s)\]>"'*]+)"#)
        .expect("Valid labelled URL regex")
});

/// Panels and title recovered from a turn's events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconciledComic {
    /// Last title observed, if any
    pub title: Option<String>,
    /// Panels of the last script observed, with media joined in
    pub panels: Vec<Panel>,
}

#[derive(Default)]
struct Scan {
    title: Option<String>,
    base: Vec<Panel>,
    images: HashMap<u32, String>,
    audio: HashMap<u32, String>,
}

/// Reconstruct the comic from an ordered list of events.
///
/// The last script-bearing event defines the panel list. Image and audio
/// entries are joined onto it by panel id; entries for unknown panels are
/// dropped. Without any script the panel list is empty. Malformed data is
/// skipped.
///
/// # Examples
///
/// ```
/// use panelwright_client::reconcile_events;
/// use serde_json::json;
///
/// let events = vec![
///     json!({"actions": {"stateDelta": {"comic_script": {
///         "title": "Thor Shares",
///         "panels": [{"panelId": 1, "scene": "Thor with cake", "dialogue": "For everyone!"}]
///     }}}}),
///     json!({"actions": {"stateDelta": {"generated_images": [
///         {"panelId": 1, "imageUrl": "https://img.example.com/1.png"}
///     ]}}}),
/// ];
///
/// let comic = reconcile_events(&events);
/// assert_eq!(comic.title.as_deref(), Some("Thor Shares"));
/// assert_eq!(comic.panels[0].narration, "For everyone!");
/// assert_eq!(comic.panels[0].image_url.as_deref(), Some("https://img.example.com/1.png"));
/// ```
pub fn reconcile_events(events: &[Value]) -> ReconciledComic {
    let mut scan = Scan::default();

    for event in events {
        if let Some(delta) = event
            .get("actions")
            .and_then(|actions| actions.get("stateDelta"))
            .and_then(Value::as_object)
        {
            if let Some(script) = delta.get("comic_script") {
                scan.read_script(script);
            }
            if let Some(images) = delta.get("generated_images") {
                scan.read_images(images);
            }
            if let Some(audio) = delta.get("generated_audio") {
                scan.read_audio(audio);
            }
        }

        let parts = event
            .get("content")
            .and_then(|content| content.get("parts"))
            .and_then(Value::as_array);
        for part in parts.into_iter().flatten() {
            if let Some(response) = part.get("functionResponse") {
                scan.read_tool_response(response);
            }
            if let Some(text) = part.get("text").and_then(Value::as_str) {
                scan.read_text(text);
            }
        }
    }

    scan.finish()
}

impl Scan {
    /// Script from a state delta: an object, or JSON text holding one.
    fn read_script(&mut self, script: &Value) {
        match script {
            Value::String(text) => {
                if let Ok(parsed) = serde_json::from_str::<Value>(text) {
                    self.read_script_object(&parsed);
                }
            }
            other => self.read_script_object(other),
        }
    }

    fn read_script_object(&mut self, script: &Value) {
        if let Some(title) = non_empty_str(script.get("title")) {
            self.title = Some(title.to_string());
        }

        let Some(panels) = script.get("panels").and_then(Value::as_array) else {
            return;
        };
        if panels.is_empty() {
            return;
        }

        self.base = panels.iter().filter_map(base_panel).collect();
    }

    fn read_images(&mut self, images: &Value) {
        match images {
            Value::Array(entries) => {
                for entry in entries {
                    let url = non_empty_str(entry.get("imageUrl"))
                        .or_else(|| non_empty_str(entry.get("url")));
                    if let (Some(panel_id), Some(url)) = (panel_id(entry), url) {
                        self.images.insert(panel_id, url.to_string());
                    }
                }
            }
            Value::String(text) => {
                for (panel_id, url) in extract_image_urls(text) {
                    self.images.insert(panel_id, url);
                }
            }
            _ => {}
        }
    }

    fn read_audio(&mut self, audio: &Value) {
        let Some(entries) = audio.as_array() else {
            return;
        };
        for entry in entries {
            let data = non_empty_str(entry.get("audioBase64"))
                .or_else(|| non_empty_str(entry.get("audio")));
            if let (Some(panel_id), Some(data)) = (panel_id(entry), data) {
                self.audio.insert(panel_id, data.to_string());
            }
        }
    }

    fn read_tool_response(&mut self, function_response: &Value) {
        let name = function_response.get("name").and_then(Value::as_str);
        let Some(response) = function_response.get("response") else {
            return;
        };
        if response.get("success").and_then(Value::as_bool) != Some(true) {
            return;
        }
        let Some(panel_id) = panel_id(response) else {
            return;
        };

        match name {
            Some(IMAGE_TOOL) => {
                if let Some(url) = non_empty_str(response.get("imageUrl")) {
                    self.images.insert(panel_id, url.to_string());
                }
            }
            Some(AUDIO_TOOL) => {
                if let Some(data) = non_empty_str(response.get("audioBase64")) {
                    self.audio.insert(panel_id, data.to_string());
                }
            }
            _ => {}
        }
    }

    /// Text parts that are JSON may carry a script or an `images` array.
    fn read_text(&mut self, text: &str) {
        let Ok(parsed) = serde_json::from_str::<Value>(text.trim()) else {
            return;
        };

        let has_panels = parsed
            .get("panels")
            .and_then(Value::as_array)
            .is_some_and(|panels| !panels.is_empty());
        if has_panels {
            self.read_script_object(&parsed);
        }

        if let Some(images) = parsed.get("images").filter(|images| images.is_array()) {
            self.read_images(images);
        }
    }

    fn finish(self) -> ReconciledComic {
        let Scan {
            title,
            base,
            images,
            audio,
        } = self;

        let panels = base
            .into_iter()
            .map(|mut panel| {
                if let Some(url) = images.get(&panel.panel_id) {
                    panel.image_url = Some(url.clone());
                }
                if let Some(data) = audio.get(&panel.panel_id) {
                    panel.audio = Some(AudioSource::from(data.clone()));
                }
                panel
            })
            .collect();

        ReconciledComic { title, panels }
    }
}

/// Panel from a loosely-shaped script entry.
fn base_panel(entry: &Value) -> Option<Panel> {
    let panel_id = panel_id(entry)?;
    let text = |key: &str| non_empty_str(entry.get(key)).map(str::to_string);

    let dialogue = text("dialogue").unwrap_or_default();
    let characters = match entry.get("characters") {
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => non_empty_str(other).unwrap_or_default().to_string(),
    };

    Some(Panel {
        panel_id,
        image_prompt: text("imagePrompt").or_else(|| text("scene")).unwrap_or_default(),
        characters,
        narration: text("narration").unwrap_or_else(|| dialogue.clone()),
        dialogue,
        image_url: text("imageUrl"),
        audio: text("audioBase64").map(AudioSource::from),
    })
}

/// Positive integer panel id, from a number or numeric string.
fn panel_id(entry: &Value) -> Option<u32> {
    let id = match entry.get("panelId")? {
        Value::Number(number) => match number.as_u64() {
            Some(id) => id,
            None => {
                let float = number.as_f64()?;
                if float.fract() != 0.0 || float < 1.0 {
                    return None;
                }
                float as u64
            }
        },
        Value::String(text) => text.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(id).ok().filter(|id| *id > 0)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Recover `(panel id, url)` pairs from text such as
/// `"**Panel 2:** ... **Image URL:** https://x/y.png"`.
///
/// The text is scanned left to right. A `Panel N` marker takes the first
/// `Image URL:` or `URL:` link after it, unless another marker comes first,
/// and scanning resumes after the link. Markers inside a link never split it.
/// Markers without a number never match.
///
/// # Examples
///
/// ```
/// use panelwright_client::extract_image_urls;
///
/// let text = "Panel 2: Thor shares cake. Image URL: https://x/y.png";
/// assert_eq!(extract_image_urls(text), vec![(2, "https://x/y.png".to_string())]);
///
/// assert!(extract_image_urls("Panel: Image URL: https://x/y.png").is_empty());
/// ```
pub fn extract_image_urls(text: &str) -> Vec<(u32, String)> {
    let mut pairs = Vec::new();
    let mut position = 0;

    while let Some(marker) = PANEL_MARKER.captures_at(text, position) {
        let (Some(whole), Some(digits)) = (marker.get(0), marker.get(1)) else {
            break;
        };
        position = whole.end();

        let Some(link) = LABELLED_URL.captures_at(text, position) else {
            break;
        };
        let (Some(label), Some(url)) = (link.get(0), link.get(1)) else {
            break;
        };

        let next_marker = PANEL_MARKER.find_at(text, position).map(|m| m.start());
        if next_marker.is_some_and(|start| start < label.start()) {
            continue;
        }

        if let Some(id) = digits.as_str().parse::<u32>().ok().filter(|id| *id > 0) {
            pairs.push((id, url.as_str().to_string()));
        }
        position = url.end();
    }

    pairs
}

/// Text of the first text part of the last event that has one.
///
/// # Examples
///
/// ```
/// use panelwright_client::final_response;
/// use serde_json::json;
///
/// let events = vec![
///     json!({"content": {"parts": [{"text": "first"}]}}),
///     json!({"content": {"parts": [{"text": "second"}, {"text": "third"}]}}),
///     json!({"content": {"parts": [{"functionCall": {"name": "generate_comic_image"}}]}}),
/// ];
/// assert_eq!(final_response(&events).as_deref(), Some("second"));
/// ```
pub fn final_response(events: &[Value]) -> Option<String> {
    events.iter().rev().find_map(|event| {
        event
            .get("content")?
            .get("parts")?
            .as_array()?
            .iter()
            .find_map(|part| non_empty_str(part.get("text")))
            .map(str::to_string)
    })
}
