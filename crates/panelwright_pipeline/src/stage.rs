//! The fixed stage sequence of the comic pipeline.

/// One step of the comic pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Write the comic script
    #[strum(serialize = "script_generator")]
    Script,
    /// Write one image prompt per panel
    #[strum(serialize = "image_prompt_generator")]
    ImagePrompts,
    /// Draw every panel
    #[strum(serialize = "image_generator")]
    Images,
    /// Narrate every panel
    #[strum(serialize = "tts_generator")]
    Audio,
}

impl Stage {
    /// Event author for this stage.
    pub fn author(&self) -> &'static str {
        match self {
            Stage::Script => "script_generator",
            Stage::ImagePrompts => "image_prompt_generator",
            Stage::Images => "image_generator",
            Stage::Audio => "tts_generator",
        }
    }

    /// State-delta key the stage's output is published under.
    pub fn slot(&self) -> &'static str {
        match self {
            Stage::Script => "comic_script",
            Stage::ImagePrompts => "image_prompts",
            Stage::Images => "generated_images",
            Stage::Audio => "generated_audio",
        }
    }
}
