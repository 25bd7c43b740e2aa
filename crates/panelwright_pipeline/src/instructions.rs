//! Bundled agent instructions.

use panelwright_error::{PanelwrightResult, PipelineError, PipelineErrorKind};
use serde::Deserialize;

const BUNDLED: &str = include_str!("../instructions.toml");

#[derive(Debug, Deserialize)]
struct Section {
    instruction: String,
}

#[derive(Debug, Deserialize)]
struct InstructionFile {
    requirements: Section,
    script: Section,
    image_prompts: Section,
}

/// System instructions for the requirements agent and the LLM stages.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Instructions {
    requirements: String,
    script: String,
    image_prompts: String,
}

impl Instructions {
    /// Instructions compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns error if the bundled file does not parse.
    pub fn bundled() -> PanelwrightResult<Self> {
        Self::from_toml(BUNDLED)
    }

    /// Parse instructions from TOML with `[requirements]`, `[script]` and
    /// `[image_prompts]` tables, each holding an `instruction` string.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is invalid or a table is missing.
    pub fn from_toml(source: &str) -> PanelwrightResult<Self> {
        let file: InstructionFile = toml::from_str(source).map_err(|e| {
            PipelineError::new(PipelineErrorKind::Instructions(e.to_string()))
        })?;

        Ok(Self {
            requirements: file.requirements.instruction,
            script: file.script.instruction,
            image_prompts: file.image_prompts.instruction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_instructions_parse() {
        let instructions = Instructions::bundled().unwrap();
        assert!(instructions.requirements().contains("```json"));
        assert!(instructions.script().contains("panelId"));
        assert!(instructions.image_prompts().contains("artStyle"));
    }

    #[test]
    fn test_missing_section_is_error() {
        let result = Instructions::from_toml("[script]\ninstruction = \"x\"\n");
        assert!(result.is_err());
    }
}
