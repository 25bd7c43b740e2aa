//! Configuration structures and loading.

use config::{Config, Environment, File, FileFormat};
use panelwright_core::{AspectRatio, Resolution, Speaker};
use panelwright_error::{ConfigError, ConfigErrorKind, PanelwrightError, PanelwrightResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../panelwright.toml");

/// Environment variable overriding the client backend URL.
const BACKEND_URL_ENV: &str = "PANELWRIGHT_BACKEND_URL";

/// Conversational agent settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Application name sessions are created under
    pub app_name: String,
    /// Model used by the requirements agent
    pub root_model: String,
    /// Model used by the script and prompt stages
    pub stage_model: String,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl ServerSettings {
    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Backend client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL of the agent backend
    pub backend_url: String,
    /// Give up on a turn after this long; a full comic takes minutes
    pub timeout_secs: u64,
}

/// Image provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSettings {
    /// Replicate model in `owner/name` form
    pub model: String,
    /// Aspect ratio used when a call names none
    pub aspect_ratio: AspectRatio,
    /// Resolution used when a call names none
    pub resolution: Resolution,
    /// Image format requested from the model
    pub output_format: String,
    /// Safety filter requested from the model
    pub safety_filter_level: String,
    /// Delay between prediction status checks
    pub poll_interval_ms: u64,
    /// Give up on a prediction after this long
    pub timeout_secs: u64,
}

/// Speech provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// Text-to-speech endpoint
    pub endpoint: String,
    /// Speech model
    pub model: String,
    /// Voice used when a call names none
    pub speaker: Speaker,
    /// Pitch adjustment
    pub pitch: f32,
    /// Speaking rate
    pub pace: f32,
    /// Volume
    pub loudness: f32,
    /// Let the provider normalize numbers and abbreviations
    pub enable_preprocessing: bool,
}

/// Local tool output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Directory holding `images/` and `audio/`
    pub dir: PathBuf,
}

/// Object storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Root directory holding one directory per bucket
    pub root: PathBuf,
    /// Base URL objects are served from; `file://` URLs when absent
    #[serde(default)]
    pub public_base_url: Option<String>,
    /// Bucket for panel images
    pub images_bucket: String,
    /// Bucket for panel audio
    pub audio_bucket: String,
}

/// Complete Panelwright configuration.
///
/// # Example
///
/// ```no_run
/// use panelwright_config::PanelwrightConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PanelwrightConfig::load()?;
/// println!("serving on {}", config.server.bind_address());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelwrightConfig {
    /// Agent settings
    pub agent: AgentSettings,
    /// Server settings
    pub server: ServerSettings,
    /// Client settings
    pub client: ClientSettings,
    /// Image provider settings
    pub image: ImageSettings,
    /// Speech provider settings
    pub speech: SpeechSettings,
    /// Tool output settings
    pub output: OutputSettings,
    /// Object storage settings
    pub storage: StorageSettings,
}

impl PanelwrightConfig {
    /// Load configuration from all layers.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a layer cannot be read or the merged
    /// result does not deserialize.
    #[instrument]
    pub fn load() -> PanelwrightResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/panelwright/panelwright.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("panelwright").required(false))
            .add_source(
                Environment::with_prefix("PANELWRIGHT")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = Self::build(builder)?;

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            debug!(url = %url, "Backend URL overridden from environment");
            config.client.backend_url = url;
        }

        Ok(config)
    }

    /// Bundled defaults only.
    pub fn defaults() -> PanelwrightResult<Self> {
        Self::from_toml_layers(&[])
    }

    /// Bundled defaults overlaid with the given TOML documents, in order.
    pub fn from_toml_layers(layers: &[&str]) -> PanelwrightResult<Self> {
        let builder = layers.iter().fold(
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
            |builder, layer| builder.add_source(File::from_str(layer, FileFormat::Toml)),
        );
        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> PanelwrightResult<Self> {
        builder
            .build()
            .map_err(|e| {
                PanelwrightError::from(ConfigError::new(ConfigErrorKind::Load(e.to_string())))
            })?
            .try_deserialize()
            .map_err(|e| {
                PanelwrightError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults_parse() {
        let config = PanelwrightConfig::defaults().unwrap();
        assert_eq!(config.agent.app_name, "agent");
        assert_eq!(config.server.bind_address(), "127.0.0.1:8000");
        assert_eq!(config.client.backend_url, "http://localhost:8000");
        assert_eq!(config.image.aspect_ratio, AspectRatio::Landscape);
        assert_eq!(config.image.resolution, Resolution::TwoK);
        assert_eq!(config.speech.speaker, Speaker::Anushka);
        assert_eq!(config.storage.images_bucket, "comic-images");
        assert_eq!(config.storage.audio_bucket, "comic-audio");
        assert!(config.storage.public_base_url.is_none());
    }

    #[test]
    fn test_later_layers_win() {
        let config = PanelwrightConfig::from_toml_layers(&[
            "[server]\nport = 9100\n",
            "[speech]\nspeaker = \"karun\"\n",
        ])
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.speech.speaker, Speaker::Karun);
    }

    #[test]
    fn test_invalid_override_reports_config_error() {
        let err = PanelwrightConfig::from_toml_layers(&["[image]\naspect_ratio = \"2:1\"\n"])
            .unwrap_err();
        assert!(format!("{}", err).contains("Configuration Error"));
    }

    #[test]
    fn test_defaults_file_is_valid_toml() {
        let value: toml::Value = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(value.get("storage").is_some());
    }
}
