//! Story requirements collected by the conversational agent.

use crate::Language;
use panelwright_error::{PanelwrightResult, PipelineError, PipelineErrorKind};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Panel counts the agent suggests to parents. Other counts are accepted.
pub const SUGGESTED_PANEL_COUNTS: RangeInclusive<u32> = 4..=6;

/// Visual theme of the comic. Only one theme exists.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Superhero team characters
    #[default]
    Avengers,
}

/// Everything the pipeline needs to write a comic.
///
/// # Examples
///
/// ```
/// use panelwright_core::{Language, Requirements};
///
/// let json = r#"{"lesson":"sharing","childAge":6,"language":"en-IN","panelCount":4}"#;
/// let requirements: Requirements = serde_json::from_str(json).unwrap();
///
/// assert_eq!(requirements.language, Language::English);
/// assert!(requirements.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    /// Moral or lesson the story teaches
    pub lesson: String,
    /// Age of the child in years
    pub child_age: u32,
    /// Narration language
    pub language: Language,
    /// Number of panels to draw
    pub panel_count: u32,
    /// Visual theme
    #[serde(default)]
    pub theme: Theme,
}

impl Requirements {
    /// Check that every field carries a usable value.
    ///
    /// # Errors
    ///
    /// Returns `PipelineErrorKind::InvalidRequirements` naming the first bad field.
    pub fn validate(&self) -> PanelwrightResult<()> {
        let problem = if self.lesson.trim().is_empty() {
            Some("lesson is empty")
        } else if self.child_age == 0 {
            Some("childAge must be positive")
        } else if self.panel_count == 0 {
            Some("panelCount must be positive")
        } else {
            None
        };

        match problem {
            Some(message) => Err(PipelineError::new(PipelineErrorKind::InvalidRequirements(
                message.to_string(),
            ))
            .into()),
            None => Ok(()),
        }
    }

    /// Whether the panel count falls in the suggested range.
    pub fn has_suggested_panel_count(&self) -> bool {
        SUGGESTED_PANEL_COUNTS.contains(&self.panel_count)
    }

    /// Key/value pairs written to session state when requirements are confirmed.
    pub fn state_entries(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![
            ("lesson", serde_json::Value::from(self.lesson.clone())),
            ("childAge", serde_json::Value::from(self.child_age)),
            ("language", serde_json::Value::from(self.language.code())),
            ("panelCount", serde_json::Value::from(self.panel_count)),
            ("theme", serde_json::Value::from(self.theme.to_string())),
        ]
    }
}
