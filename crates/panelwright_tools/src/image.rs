//! The `generate_comic_image` tool.

use crate::{failure_reason, panel_id_from};
use async_trait::async_trait;
use panelwright_core::{AspectRatio, ImageRequest, ImageToolInput, ImageToolOutput, Resolution};
use panelwright_interface::{ComicTool, ImageSynthesizer, ToolDefinition};
use panelwright_storage::{LocalOutputDir, MediaKind};
use serde_json::{Value, json};
use std::sync::Arc;

/// Generates one comic panel image and saves it locally.
#[derive(Clone)]
pub struct GenerateImageTool {
    synthesizer: Arc<dyn ImageSynthesizer>,
    output: LocalOutputDir,
    aspect_ratio: AspectRatio,
    resolution: Resolution,
}

impl std::fmt::Debug for GenerateImageTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateImageTool")
            .field("provider", &self.synthesizer.provider_name())
            .field("output", &self.output)
            .field("aspect_ratio", &self.aspect_ratio)
            .field("resolution", &self.resolution)
            .finish()
    }
}

impl GenerateImageTool {
    /// Tool name used in function calls.
    pub const NAME: &'static str = "generate_comic_image";

    /// Create the tool with `4:3` and `2K` defaults.
    pub fn new(synthesizer: Arc<dyn ImageSynthesizer>, output: LocalOutputDir) -> Self {
        Self {
            synthesizer,
            output,
            aspect_ratio: AspectRatio::default(),
            resolution: Resolution::default(),
        }
    }

    /// Override the defaults used when a call names none.
    pub fn with_defaults(mut self, aspect_ratio: AspectRatio, resolution: Resolution) -> Self {
        self.aspect_ratio = aspect_ratio;
        self.resolution = resolution;
        self
    }

    /// Generate, download and save one panel image.
    #[tracing::instrument(skip(self, input), fields(panel_id = input.panel_id, provider = self.synthesizer.provider_name()))]
    pub async fn execute(&self, input: ImageToolInput) -> ImageToolOutput {
        let request = ImageRequest {
            prompt: input.prompt,
            aspect_ratio: input.aspect_ratio.unwrap_or(self.aspect_ratio),
            resolution: input.resolution.unwrap_or(self.resolution),
        };

        let image = match self.synthesizer.synthesize(&request).await {
            Ok(image) => image,
            Err(e) => {
                tracing::error!(error = %e, "Image generation failed");
                return ImageToolOutput::failed(input.panel_id, failure_reason(&e));
            }
        };

        match self
            .output
            .save(MediaKind::Image, input.panel_id, &image.data)
            .await
        {
            Ok(saved) => ImageToolOutput::succeeded(
                input.panel_id,
                image.url,
                saved.path.display().to_string(),
                saved.filename,
            ),
            Err(e) => {
                tracing::error!(error = %e, "Saving image failed");
                ImageToolOutput::failed(input.panel_id, failure_reason(&e))
            }
        }
    }
}

#[async_trait]
impl ComicTool for GenerateImageTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Generate a comic panel image from a text prompt and save it locally."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "Detailed text-to-image prompt for the panel"
                    },
                    "panelId": {
                        "type": "integer",
                        "description": "Panel number, starting at 1"
                    },
                    "aspectRatio": {
                        "type": "string",
                        "enum": ["1:1", "4:3", "3:4", "16:9", "9:16"],
                        "description": "Image aspect ratio (default 4:3)"
                    },
                    "resolution": {
                        "type": "string",
                        "enum": ["1K", "2K"],
                        "description": "Image resolution (default 2K)"
                    }
                },
                "required": ["prompt", "panelId"]
            }),
        }
    }

    async fn call(&self, args: Value) -> Value {
        let output = match serde_json::from_value::<ImageToolInput>(args.clone()) {
            Ok(input) => self.execute(input).await,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid image tool arguments");
                ImageToolOutput::failed(panel_id_from(&args), format!("Invalid arguments: {}", e))
            }
        };
        serde_json::to_value(output).unwrap_or(Value::Null)
    }
}
