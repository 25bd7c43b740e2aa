//! `serve` command handler.

use super::ServeArgs;
use panelwright::{AppState, PanelwrightConfig, PanelwrightResult};

/// Build the runner from configuration and serve it until Ctrl-C.
#[cfg(feature = "gemini")]
pub async fn run_server(config: &PanelwrightConfig, args: ServeArgs) -> PanelwrightResult<()> {
    let mut server = config.server.clone();
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }

    let runner = panelwright::build_runner(config)?;
    tracing::info!(app = %config.agent.app_name, "Starting comic backend. Press Ctrl+C to stop.");
    panelwright::serve(&server.bind_address(), AppState::new(runner)).await
}

/// Without a language model driver there is nothing to serve.
#[cfg(not(feature = "gemini"))]
pub async fn run_server(_config: &PanelwrightConfig, _args: ServeArgs) -> PanelwrightResult<()> {
    Err(panelwright::ConfigError::new(panelwright::ConfigErrorKind::FeatureDisabled {
        command: "serve",
        feature: "gemini",
    })
    .into())
}
