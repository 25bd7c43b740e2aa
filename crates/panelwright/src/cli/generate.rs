//! `generate` command handler.

use super::GenerateArgs;
use panelwright::{PanelwrightConfig, PanelwrightResult};

/// Run the pipeline once and print the comic as JSON on stdout.
#[cfg(feature = "gemini")]
pub async fn generate_comic(config: &PanelwrightConfig, args: GenerateArgs) -> PanelwrightResult<()> {
    use panelwright::{EventLog, JsonError, JsonErrorKind, Requirements, generate_comic_id};

    let requirements = Requirements {
        lesson: args.lesson,
        child_age: args.age,
        language: args.language,
        panel_count: args.panels,
        theme: args.theme,
    };
    requirements.validate()?;
    if !requirements.has_suggested_panel_count() {
        tracing::warn!(panels = requirements.panel_count, "Comics usually have 4 to 6 panels");
    }

    let runner = panelwright::build_runner(config)?;
    let comic_id = generate_comic_id();
    let log = EventLog::new();
    let context = runner.pipeline().execute(&comic_id, &requirements, &log).await?;
    tracing::debug!(events = log.drain().len(), "Pipeline finished");

    let mut comic = context.assemble();
    if args.user.is_some() {
        let persister = panelwright::media_persister(config)?;
        comic.panels = persister
            .persist_panels(args.user.as_deref(), &comic_id, comic.panels)
            .await;
    }

    let json = serde_json::to_string_pretty(&comic)
        .map_err(|e| {
            JsonError::new(JsonErrorKind::Serialize {
                subject: "comic".to_string(),
                message: e.to_string(),
            })
        })?;
    println!("{}", json);
    Ok(())
}

/// Without a language model driver no script can be written.
#[cfg(not(feature = "gemini"))]
pub async fn generate_comic(_config: &PanelwrightConfig, _args: GenerateArgs) -> PanelwrightResult<()> {
    Err(panelwright::ConfigError::new(panelwright::ConfigErrorKind::FeatureDisabled {
        command: "generate",
        feature: "gemini",
    })
    .into())
}
