//! Typed state threaded through the pipeline stages.

use panelwright_core::{
    AudioSource, AudioToolOutput, Comic, ComicScript, ImagePrompts, ImageToolOutput, Panel,
    Requirements,
};
use serde::{Deserialize, Serialize};

/// Everything the pipeline has produced so far for one comic.
///
/// Each stage reads what earlier stages wrote and fills in its own field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicContext {
    /// What the parent asked for
    pub requirements: Requirements,
    /// Stage 1 output
    pub script: Option<ComicScript>,
    /// Stage 2 output
    pub image_prompts: Option<ImagePrompts>,
    /// Stage 3 output, one record per panel
    pub images: Vec<ImageToolOutput>,
    /// Stage 4 output, one record per panel
    pub audio: Vec<AudioToolOutput>,
}

impl ComicContext {
    /// Fresh context for a set of requirements.
    pub fn new(requirements: Requirements) -> Self {
        Self {
            requirements,
            script: None,
            image_prompts: None,
            images: Vec::new(),
            audio: Vec::new(),
        }
    }

    /// Image prompt for a panel, falling back to its scene.
    pub fn prompt_for(&self, panel_id: u32) -> Option<String> {
        let prompt = self
            .image_prompts
            .as_ref()
            .and_then(|prompts| prompts.prompt_for(panel_id))
            .filter(|prompt| !prompt.trim().is_empty());
        match prompt {
            Some(prompt) => Some(prompt.to_string()),
            None => self
                .script
                .as_ref()?
                .panels
                .iter()
                .find(|panel| panel.panel_id == panel_id)
                .map(|panel| panel.scene.clone()),
        }
    }

    /// Join script, prompts and media records into a comic.
    ///
    /// Failed media records leave the panel without that media.
    pub fn assemble(&self) -> Comic {
        let Some(script) = &self.script else {
            return Comic {
                lesson: self.requirements.lesson.clone(),
                ..Comic::default()
            };
        };

        let panels = script
            .panels
            .iter()
            .map(|script_panel| {
                let mut panel = Panel::from(script_panel);
                if let Some(prompt) = self.prompt_for(panel.panel_id) {
                    panel.image_prompt = prompt;
                }
                panel.image_url = self
                    .images
                    .iter()
                    .find(|record| record.success && record.panel_id == panel.panel_id)
                    .and_then(|record| record.image_url.clone());
                panel.audio = self
                    .audio
                    .iter()
                    .find(|record| record.success && record.panel_id == panel.panel_id)
                    .and_then(|record| record.audio_base64.clone())
                    .map(AudioSource::Base64);
                panel
            })
            .collect();

        let lesson = if script.lesson.trim().is_empty() {
            self.requirements.lesson.clone()
        } else {
            script.lesson.clone()
        };

        Comic {
            title: script.title.clone(),
            lesson,
            panels,
        }
    }
}
