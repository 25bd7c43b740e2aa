//! The four-stage comic pipeline.

use crate::{ComicContext, EventSink, Instructions, Stage, extract_json, parse_json};
use panelwright_core::{
    AgentEvent, AudioToolInput, ComicScript, FunctionCall, FunctionResponse, GenerateRequest,
    GenerateRequestBuilder, ImagePrompts, ImageToolInput, Message, Requirements,
};
use panelwright_error::{BuilderError, BuilderErrorKind, PanelwrightResult, PipelineError, PipelineErrorKind};
use panelwright_interface::ComicDriver;
use panelwright_tools::{GenerateAudioTool, GenerateImageTool};
use serde_json::Value;
use std::sync::Arc;

/// Runs script, image prompt, image and audio generation in order.
///
/// The two LLM stages fail the whole run on a provider error or
/// unparseable output. The media stages never fail: each panel gets a
/// success or failure record.
#[derive(Clone)]
pub struct ComicPipeline {
    driver: Arc<dyn ComicDriver>,
    image_tool: GenerateImageTool,
    audio_tool: GenerateAudioTool,
    instructions: Instructions,
    stage_model: Option<String>,
}

impl std::fmt::Debug for ComicPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComicPipeline")
            .field("provider", &self.driver.provider_name())
            .field("stage_model", &self.stage_model)
            .field("image_tool", &self.image_tool)
            .field("audio_tool", &self.audio_tool)
            .finish()
    }
}

impl ComicPipeline {
    /// Create a pipeline. LLM stages use the driver's model.
    pub fn new(
        driver: Arc<dyn ComicDriver>,
        image_tool: GenerateImageTool,
        audio_tool: GenerateAudioTool,
        instructions: Instructions,
    ) -> Self {
        Self {
            driver,
            image_tool,
            audio_tool,
            instructions,
            stage_model: None,
        }
    }

    /// Use a specific model for the script and prompt stages.
    pub fn with_stage_model(mut self, model: impl Into<String>) -> Self {
        self.stage_model = Some(model.into());
        self
    }

    /// Generate a complete comic, emitting events to `sink` as stages finish.
    #[tracing::instrument(
        skip(self, requirements, sink),
        fields(lesson = %requirements.lesson, language = %requirements.language, panel_count = requirements.panel_count)
    )]
    pub async fn execute(
        &self,
        invocation_id: &str,
        requirements: &Requirements,
        sink: &dyn EventSink,
    ) -> PanelwrightResult<ComicContext> {
        let mut context = ComicContext::new(requirements.clone());

        self.write_script(invocation_id, &mut context, sink).await?;
        self.write_image_prompts(invocation_id, &mut context, sink)
            .await?;
        self.draw_panels(invocation_id, &mut context, sink).await?;
        self.narrate_panels(invocation_id, &mut context, sink)
            .await?;

        tracing::info!(
            images = context.images.iter().filter(|r| r.success).count(),
            audio = context.audio.iter().filter(|r| r.success).count(),
            "Comic pipeline complete"
        );
        Ok(context)
    }

    fn request(&self, system: &str, prompt: String) -> PanelwrightResult<GenerateRequest> {
        let mut builder = GenerateRequestBuilder::default();
        builder
            .messages(vec![Message::user(prompt)])
            .system_instruction(Some(system.to_string()));
        if let Some(model) = &self.stage_model {
            builder.model(Some(model.clone()));
        }
        builder.build().map_err(|e| {
            BuilderError::new(BuilderErrorKind::Request(e.to_string())).into()
        })
    }

    /// Stage 1: requirements brief to [`ComicScript`].
    #[tracing::instrument(skip_all, fields(stage = %Stage::Script))]
    async fn write_script(
        &self,
        invocation_id: &str,
        context: &mut ComicContext,
        sink: &dyn EventSink,
    ) -> PanelwrightResult<()> {
        let stage = Stage::Script;
        let brief = script_brief(&context.requirements);
        let request = self.request(self.instructions.script(), brief)?;

        let response = self.driver.generate(&request).await?;
        let text = response.text();
        let json = extract_json(stage.author(), &text)?;
        let mut script: ComicScript = parse_json(stage.author(), &json)?;

        if script.panels.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyScript).into());
        }
        for (index, panel) in script.panels.iter_mut().enumerate() {
            panel.panel_id = index as u32 + 1;
        }
        if script.panels.len() != context.requirements.panel_count as usize {
            tracing::warn!(
                requested = context.requirements.panel_count,
                generated = script.panels.len(),
                "Script panel count differs from request"
            );
        }

        tracing::info!(title = %script.title, panels = script.panels.len(), "Script written");
        let value = serde_json::to_value(&script).unwrap_or(Value::Null);
        sink.emit(
            AgentEvent::new(invocation_id, stage.author())
                .with_text(value.to_string())
                .with_state_delta(stage.slot(), value),
        );
        context.script = Some(script);
        Ok(())
    }

    /// Stage 2: script to [`ImagePrompts`].
    #[tracing::instrument(skip_all, fields(stage = %Stage::ImagePrompts))]
    async fn write_image_prompts(
        &self,
        invocation_id: &str,
        context: &mut ComicContext,
        sink: &dyn EventSink,
    ) -> PanelwrightResult<()> {
        let stage = Stage::ImagePrompts;
        let script = context.script.as_ref().ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::MissingStageOutput {
                stage: stage.author().to_string(),
                requires: Stage::Script.author().to_string(),
            })
        })?;

        let script_json = serde_json::to_string_pretty(script).map_err(|e| {
            PipelineError::new(PipelineErrorKind::MalformedOutput {
                stage: stage.author().to_string(),
                message: e.to_string(),
            })
        })?;
        let request = self.request(
            self.instructions.image_prompts(),
            format!("Comic script:\n{}", script_json),
        )?;

        let response = self.driver.generate(&request).await?;
        let text = response.text();
        let json = extract_json(stage.author(), &text)?;
        let prompts: ImagePrompts = parse_json(stage.author(), &json)?;

        let missing = script
            .panels
            .iter()
            .filter(|panel| prompts.prompt_for(panel.panel_id).is_none())
            .count();
        if missing > 0 {
            tracing::warn!(missing, "Panels without an image prompt will use their scene");
        }

        sink.emit(
            AgentEvent::new(invocation_id, stage.author())
                .with_text(json.clone())
                .with_state_delta(stage.slot(), serde_json::to_value(&prompts).unwrap_or(Value::Null)),
        );
        context.image_prompts = Some(prompts);
        Ok(())
    }

    /// Stage 3: one image tool call per panel.
    #[tracing::instrument(skip_all, fields(stage = %Stage::Images))]
    async fn draw_panels(
        &self,
        invocation_id: &str,
        context: &mut ComicContext,
        sink: &dyn EventSink,
    ) -> PanelwrightResult<()> {
        let stage = Stage::Images;
        let panel_ids = self.panel_ids(stage, context)?;

        for panel_id in panel_ids {
            let prompt = context.prompt_for(panel_id).unwrap_or_default();
            let input = ImageToolInput {
                prompt: styled_prompt(context, &prompt),
                panel_id,
                aspect_ratio: None,
                resolution: None,
            };

            let args = serde_json::to_value(&input).unwrap_or(Value::Null);
            let call_id = emit_call(sink, invocation_id, stage, GenerateImageTool::NAME, args);
            let output = self.image_tool.execute(input).await;
            emit_response(
                sink,
                invocation_id,
                stage,
                call_id,
                GenerateImageTool::NAME,
                serde_json::to_value(&output).unwrap_or(Value::Null),
            );
            context.images.push(output);
        }

        let records = serde_json::to_value(&context.images).unwrap_or(Value::Null);
        sink.emit(
            AgentEvent::new(invocation_id, stage.author())
                .with_text("Images ready!")
                .with_state_delta(stage.slot(), records),
        );
        Ok(())
    }

    /// Stage 4: one audio tool call per panel.
    #[tracing::instrument(skip_all, fields(stage = %Stage::Audio))]
    async fn narrate_panels(
        &self,
        invocation_id: &str,
        context: &mut ComicContext,
        sink: &dyn EventSink,
    ) -> PanelwrightResult<()> {
        let stage = Stage::Audio;
        self.panel_ids(stage, context)?;
        let panels = context
            .script
            .as_ref()
            .map(|script| script.panels.clone())
            .unwrap_or_default();

        for panel in &panels {
            let input = AudioToolInput {
                text: panel.spoken_text(),
                language: context.requirements.language,
                panel_id: panel.panel_id,
                speaker: None,
            };

            let args = serde_json::to_value(&input).unwrap_or(Value::Null);
            let call_id = emit_call(sink, invocation_id, stage, GenerateAudioTool::NAME, args);
            let output = self.audio_tool.execute(input).await;
            emit_response(
                sink,
                invocation_id,
                stage,
                call_id,
                GenerateAudioTool::NAME,
                serde_json::to_value(&output).unwrap_or(Value::Null),
            );
            context.audio.push(output);
        }

        let generated: Vec<String> = context
            .audio
            .iter()
            .filter(|record| record.success)
            .map(|record| record.panel_id.to_string())
            .collect();
        let summary = if generated.is_empty() {
            "No audio was generated.".to_string()
        } else {
            format!("Generated audio for panels {}.", generated.join(", "))
        };

        let records = serde_json::to_value(&context.audio).unwrap_or(Value::Null);
        sink.emit(
            AgentEvent::new(invocation_id, stage.author())
                .with_text(summary)
                .with_state_delta(stage.slot(), records),
        );
        Ok(())
    }

    fn panel_ids(&self, stage: Stage, context: &ComicContext) -> PanelwrightResult<Vec<u32>> {
        let script = context.script.as_ref().ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::MissingStageOutput {
                stage: stage.author().to_string(),
                requires: Stage::Script.author().to_string(),
            })
        })?;
        Ok(script.panels.iter().map(|panel| panel.panel_id).collect())
    }
}

/// User message for the script stage.
fn script_brief(requirements: &Requirements) -> String {
    format!(
        "Create a comic script.\n\
         Lesson: {}\n\
         Child's age: {}\n\
         Language: {} ({})\n\
         Number of panels: {}\n\
         Characters: {}",
        requirements.lesson,
        requirements.child_age,
        requirements.language.display_name(),
        requirements.language.code(),
        requirements.panel_count,
        requirements.theme,
    )
}

/// Prefix a panel prompt with the shared art style, when one was given.
fn styled_prompt(context: &ComicContext, prompt: &str) -> String {
    match context
        .image_prompts
        .as_ref()
        .map(|prompts| prompts.art_style.trim())
        .filter(|style| !style.is_empty())
    {
        Some(style) if !prompt.contains(style) => format!("{}. {}", style, prompt),
        _ => prompt.to_string(),
    }
}

fn emit_call(
    sink: &dyn EventSink,
    invocation_id: &str,
    stage: Stage,
    name: &str,
    args: Value,
) -> String {
    let id = format!("call_{}", uuid::Uuid::new_v4().simple());
    sink.emit(
        AgentEvent::new(invocation_id, stage.author()).with_function_call(FunctionCall {
            id: id.clone(),
            name: name.to_string(),
            args,
        }),
    );
    id
}

fn emit_response(
    sink: &dyn EventSink,
    invocation_id: &str,
    stage: Stage,
    call_id: String,
    name: &str,
    response: Value,
) {
    sink.emit(
        AgentEvent::new(invocation_id, stage.author()).with_function_response(FunctionResponse {
            id: call_id,
            name: name.to_string(),
            response,
        }),
    );
}
