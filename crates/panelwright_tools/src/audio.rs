//! The `generate_panel_audio` tool.

use crate::{failure_reason, panel_id_from};
use async_trait::async_trait;
use panelwright_core::{AudioToolInput, AudioToolOutput, Language, Speaker, SpeechRequest};
use panelwright_interface::{ComicTool, SpeechSynthesizer, ToolDefinition};
use panelwright_storage::{LocalOutputDir, MediaKind, decode_audio_base64};
use serde_json::{Value, json};
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Narrates one comic panel and saves the WAV locally.
#[derive(Clone)]
pub struct GenerateAudioTool {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    output: LocalOutputDir,
    speaker: Speaker,
}

impl std::fmt::Debug for GenerateAudioTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateAudioTool")
            .field("provider", &self.synthesizer.provider_name())
            .field("output", &self.output)
            .field("speaker", &self.speaker)
            .finish()
    }
}

impl GenerateAudioTool {
    /// Tool name used in function calls.
    pub const NAME: &'static str = "generate_panel_audio";

    /// Create the tool with the `anushka` voice as default.
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, output: LocalOutputDir) -> Self {
        Self {
            synthesizer,
            output,
            speaker: Speaker::default(),
        }
    }

    /// Override the voice used when a call names none.
    pub fn with_speaker(mut self, speaker: Speaker) -> Self {
        self.speaker = speaker;
        self
    }

    /// Synthesize narration for a panel and save it when audio came back.
    ///
    /// A provider response without audio still counts as success, with no
    /// local file.
    #[tracing::instrument(skip(self, input), fields(panel_id = input.panel_id, language = %input.language))]
    pub async fn execute(&self, input: AudioToolInput) -> AudioToolOutput {
        let request = SpeechRequest {
            text: input.text,
            language: input.language,
            speaker: input.speaker.unwrap_or(self.speaker),
        };

        let speech = match self.synthesizer.synthesize(&request).await {
            Ok(speech) => speech,
            Err(e) => {
                tracing::error!(error = %e, "Audio generation failed");
                return AudioToolOutput::failed(input.panel_id, failure_reason(&e));
            }
        };

        let Some(encoded) = speech.audio_base64 else {
            tracing::warn!("Provider returned no audio");
            return AudioToolOutput::succeeded(input.panel_id, None, None);
        };

        let saved = match decode_audio_base64(&encoded) {
            Ok(bytes) => self.output.save(MediaKind::Audio, input.panel_id, &bytes).await,
            Err(e) => Err(e),
        };

        match saved {
            Ok(saved) => AudioToolOutput::succeeded(
                input.panel_id,
                Some(encoded),
                Some((saved.path.display().to_string(), saved.filename)),
            ),
            Err(e) => {
                tracing::error!(error = %e, "Saving audio failed");
                AudioToolOutput::failed(input.panel_id, failure_reason(&e))
            }
        }
    }
}

#[async_trait]
impl ComicTool for GenerateAudioTool {
    fn definition(&self) -> ToolDefinition {
        let languages: Vec<&'static str> = Language::iter().map(|l| l.code()).collect();
        let speakers: Vec<String> = Speaker::iter().map(|s| s.to_string()).collect();

        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Generate narration audio for a comic panel and save it locally."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Narration and dialogue to read aloud"
                    },
                    "language": {
                        "type": "string",
                        "enum": languages,
                        "description": "Language code of the narration"
                    },
                    "panelId": {
                        "type": "integer",
                        "description": "Panel number, starting at 1"
                    },
                    "speaker": {
                        "type": "string",
                        "enum": speakers,
                        "description": "Narrator voice (default anushka)"
                    }
                },
                "required": ["text", "language", "panelId"]
            }),
        }
    }

    async fn call(&self, args: Value) -> Value {
        let output = match serde_json::from_value::<AudioToolInput>(args.clone()) {
            Ok(input) => self.execute(input).await,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid audio tool arguments");
                AudioToolOutput::failed(panel_id_from(&args), format!("Invalid arguments: {}", e))
            }
        };
        serde_json::to_value(output).unwrap_or(Value::Null)
    }
}
