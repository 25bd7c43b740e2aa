//! The comic artifact and the intermediate records stages produce.

use crate::AudioSource;
use serde::{Deserialize, Deserializer, Serialize};

/// Script written by the first pipeline stage.
///
/// # Examples
///
/// ```
/// use panelwright_core::ComicScript;
///
/// let json = r#"{
///     "title": "The Shield We Share",
///     "lesson": "sharing",
///     "panels": [
///         {"panelId": 1, "scene": "A park", "characters": ["Captain America", "Maya"],
///          "dialogue": "Want a turn?", "narration": "Maya wanted the shield."}
///     ]
/// }"#;
///
/// let script: ComicScript = serde_json::from_str(json).unwrap();
/// assert_eq!(script.panels[0].characters, "Captain America, Maya");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicScript {
    /// Comic title
    #[serde(default)]
    pub title: String,
    /// Lesson the story teaches
    #[serde(default)]
    pub lesson: String,
    /// Panels in reading order
    #[serde(default)]
    pub panels: Vec<ScriptPanel>,
}

/// One scripted panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptPanel {
    /// 1-based panel number, 0 when the model left it out
    #[serde(default, deserialize_with = "lenient_panel_id")]
    pub panel_id: u32,
    /// What the panel shows
    #[serde(default)]
    pub scene: String,
    /// Characters present, comma separated
    #[serde(default, deserialize_with = "string_or_list")]
    pub characters: String,
    /// Spoken lines
    #[serde(default)]
    pub dialogue: String,
    /// Narrator text
    #[serde(default)]
    pub narration: String,
}

impl ScriptPanel {
    /// Narration followed by dialogue, the text read aloud for this panel.
    ///
    /// # Examples
    ///
    /// ```
    /// use panelwright_core::ScriptPanel;
    ///
    /// let panel = ScriptPanel {
    ///     panel_id: 1,
    ///     narration: "Maya held the shield.".to_string(),
    ///     dialogue: "Let's share!".to_string(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(panel.spoken_text(), "Maya held the shield. Let's share!");
    /// ```
    pub fn spoken_text(&self) -> String {
        [self.narration.trim(), self.dialogue.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Image prompts written by the second pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePrompts {
    /// Shared art direction for every panel
    #[serde(default)]
    pub art_style: String,
    /// One prompt per panel
    #[serde(default)]
    pub prompts: Vec<PanelPrompt>,
}

impl ImagePrompts {
    /// Prompt for a panel, if the stage produced one.
    pub fn prompt_for(&self, panel_id: u32) -> Option<&str> {
        self.prompts
            .iter()
            .find(|p| p.panel_id == panel_id && !p.prompt.trim().is_empty())
            .map(|p| p.prompt.as_str())
    }
}

/// Image prompt for one panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelPrompt {
    /// Panel the prompt belongs to
    #[serde(default, deserialize_with = "lenient_panel_id")]
    pub panel_id: u32,
    /// Full text-to-image prompt; empty means the scene is used instead
    #[serde(default, alias = "imagePrompt")]
    pub prompt: String,
}

/// A finished comic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comic {
    /// Comic title
    pub title: String,
    /// Lesson the story teaches
    pub lesson: String,
    /// Panels in reading order
    pub panels: Vec<Panel>,
}

/// One frame of a finished comic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    /// 1-based panel number
    pub panel_id: u32,
    /// Image prompt, or the scene description when no prompt exists
    #[serde(default)]
    pub image_prompt: String,
    /// Characters present
    #[serde(default)]
    pub characters: String,
    /// Spoken lines
    #[serde(default)]
    pub dialogue: String,
    /// Narrator text
    #[serde(default)]
    pub narration: String,
    /// Generated image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Generated narration audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioSource>,
}

impl From<&ScriptPanel> for Panel {
    fn from(panel: &ScriptPanel) -> Self {
        Self {
            panel_id: panel.panel_id,
            image_prompt: panel.scene.clone(),
            characters: panel.characters.clone(),
            dialogue: panel.dialogue.clone(),
            narration: panel.narration.clone(),
            image_url: None,
            audio: None,
        }
    }
}

/// Panel id from a number or numeric string. Anything else reads as 0.
fn lenient_panel_id<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Some(serde_json::Value::String(text)) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(id.and_then(|id| u32::try_from(id).ok()).unwrap_or(0))
}

fn string_or_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::One(value) => value,
        StringOrList::Many(values) => values.join(", "),
    })
}
