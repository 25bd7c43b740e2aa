//! Panelwright CLI binary.
//!
//! - Serve the agent backend over HTTP
//! - Generate a comic in-process from explicit requirements
//! - Chat with a running backend
//! - Manage stored comic media

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, generate_comic, handle_media_command, run_chat, run_server};

    let cli = Cli::parse();

    // Provider keys usually live in .env during development
    dotenvy::dotenv().ok();

    init_logging(&cli)?;

    let config = panelwright::PanelwrightConfig::load()?;

    match cli.command {
        Commands::Serve(args) => run_server(&config, args).await?,
        Commands::Generate(args) => generate_comic(&config, args).await?,
        Commands::Chat(args) => run_chat(&config, args).await?,
        Commands::Media(command) => handle_media_command(&config, command).await?,
    }

    Ok(())
}

fn log_level(cli: &cli::Cli) -> &'static str {
    if cli.verbose { "debug" } else { "info" }
}

#[cfg(feature = "observability")]
fn init_logging(cli: &cli::Cli) -> Result<(), Box<dyn std::error::Error>> {
    use panelwright::observability::{ObservabilityConfig, init_observability};

    init_observability(
        ObservabilityConfig::default()
            .with_log_level(log_level(cli))
            .with_json_logs(cli.json_logs),
    )
}

#[cfg(not(feature = "observability"))]
fn init_logging(cli: &cli::Cli) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level(cli)))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
