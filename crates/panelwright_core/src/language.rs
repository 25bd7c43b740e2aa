//! Narration languages supported by the speech provider.

use serde::{Deserialize, Serialize};

/// One of the eleven Indian locales a comic can be narrated in.
///
/// Serializes as its locale code.
///
/// # Examples
///
/// ```
/// use panelwright_core::Language;
/// use std::str::FromStr;
///
/// let language = Language::from_str("ta-IN").unwrap();
/// assert_eq!(language, Language::Tamil);
/// assert_eq!(language.code(), "ta-IN");
/// assert_eq!(language.display_name(), "Tamil");
/// ```
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
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum Language {
    /// English (India)
    #[default]
    #[serde(rename = "en-IN")]
    #[strum(serialize = "en-IN")]
    English,
    /// Hindi
    #[serde(rename = "hi-IN")]
    #[strum(serialize = "hi-IN")]
    Hindi,
    /// Bengali
    #[serde(rename = "bn-IN")]
    #[strum(serialize = "bn-IN")]
    Bengali,
    /// Tamil
    #[serde(rename = "ta-IN")]
    #[strum(serialize = "ta-IN")]
    Tamil,
    /// Telugu
    #[serde(rename = "te-IN")]
    #[strum(serialize = "te-IN")]
    Telugu,
    /// Kannada
    #[serde(rename = "kn-IN")]
    #[strum(serialize = "kn-IN")]
    Kannada,
    /// Malayalam
    #[serde(rename = "ml-IN")]
    #[strum(serialize = "ml-IN")]
    Malayalam,
    /// Marathi
    #[serde(rename = "mr-IN")]
    #[strum(serialize = "mr-IN")]
    Marathi,
    /// Gujarati
    #[serde(rename = "gu-IN")]
    #[strum(serialize = "gu-IN")]
    Gujarati,
    /// Punjabi
    #[serde(rename = "pa-IN")]
    #[strum(serialize = "pa-IN")]
    Punjabi,
    /// Odia
    #[serde(rename = "od-IN")]
    #[strum(serialize = "od-IN")]
    Odia,
}

impl Language {
    /// The locale code sent to the speech provider.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// English name shown to parents.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Bengali => "Bengali",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
            Language::Marathi => "Marathi",
            Language::Gujarati => "Gujarati",
            Language::Punjabi => "Punjabi",
            Language::Odia => "Odia",
        }
    }
}
