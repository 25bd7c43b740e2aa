//! Wiring configuration into runnable components.

use panelwright_config::PanelwrightConfig;
use panelwright_error::PanelwrightResult;
use panelwright_interface::{ComicDriver, ImageSynthesizer, SpeechSynthesizer};
use panelwright_pipeline::{ComicPipeline, ComicRunner, Instructions, RequirementsAgent, SessionStore};
use panelwright_storage::{FileSystemObjectStore, LocalOutputDir, MediaBuckets, MediaPersister};
use panelwright_tools::{GenerateAudioTool, GenerateImageTool};
use std::sync::Arc;

/// Image and audio tools writing under the configured output directory.
pub fn build_tools(
    config: &PanelwrightConfig,
    images: Arc<dyn ImageSynthesizer>,
    speech: Arc<dyn SpeechSynthesizer>,
) -> (GenerateImageTool, GenerateAudioTool) {
    let output = LocalOutputDir::new(&config.output.dir);
    let image_tool = GenerateImageTool::new(images, output.clone())
        .with_defaults(config.image.aspect_ratio, config.image.resolution);
    let audio_tool = GenerateAudioTool::new(speech, output).with_speaker(config.speech.speaker);
    (image_tool, audio_tool)
}

/// Runner over explicit providers and a fresh session store.
///
/// # Errors
///
/// Fails only if the bundled agent instructions do not parse.
pub fn build_runner_with(
    config: &PanelwrightConfig,
    driver: Arc<dyn ComicDriver>,
    images: Arc<dyn ImageSynthesizer>,
    speech: Arc<dyn SpeechSynthesizer>,
) -> PanelwrightResult<ComicRunner> {
    let instructions = Instructions::bundled()?;
    let (image_tool, audio_tool) = build_tools(config, images, speech);

    let agent = RequirementsAgent::new(driver.clone(), instructions.requirements().clone())
        .with_model(&config.agent.root_model);
    let pipeline = ComicPipeline::new(driver, image_tool, audio_tool, instructions)
        .with_stage_model(&config.agent.stage_model);

    Ok(ComicRunner::new(agent, pipeline, Arc::new(SessionStore::new())))
}

/// Runner backed by Gemini, Replicate and Sarvam.
///
/// # Errors
///
/// A provider credential is missing from the environment.
#[cfg(feature = "gemini")]
pub fn build_runner(config: &PanelwrightConfig) -> PanelwrightResult<ComicRunner> {
    use panelwright_models::{GeminiClient, ReplicateClient, SarvamClient};

    let driver = GeminiClient::new(&config.agent.root_model)?;
    let images = ReplicateClient::new(config.image.clone())?;
    let speech = SarvamClient::new(config.speech.clone())?;
    tracing::info!(
        root_model = %config.agent.root_model,
        stage_model = %config.agent.stage_model,
        image_model = %config.image.model,
        "Providers ready"
    );
    build_runner_with(config, Arc::new(driver), Arc::new(images), Arc::new(speech))
}

/// Filesystem object store named by the configuration.
pub fn object_store(config: &PanelwrightConfig) -> PanelwrightResult<FileSystemObjectStore> {
    FileSystemObjectStore::new(&config.storage.root, config.storage.public_base_url.clone())
}

/// Persister moving finished comics into the configured buckets.
pub fn media_persister(config: &PanelwrightConfig) -> PanelwrightResult<MediaPersister> {
    Ok(MediaPersister::new(
        Arc::new(object_store(config)?),
        MediaBuckets {
            images: config.storage.images_bucket.clone(),
            audio: config.storage.audio_bucket.clone(),
        },
    ))
}
