//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use panelwright::{Language, Theme};

/// Panelwright - comics that teach children a lesson
#[derive(Parser, Debug)]
#[command(name = "panelwright")]
#[command(about = "Generate illustrated, narrated children's comics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the agent backend over HTTP
    Serve(ServeArgs),

    /// Generate one comic in-process and print it as JSON
    Generate(GenerateArgs),

    /// Chat with a running backend
    Chat(ChatArgs),

    /// Stored comic media
    #[command(subcommand)]
    Media(MediaCommands),
}

/// Options of `serve`
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind host, overriding the configuration
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overriding the configuration
    #[arg(long)]
    pub port: Option<u16>,
}

/// Options of `generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Lesson the story teaches
    #[arg(long)]
    pub lesson: String,

    /// Age of the child in years
    #[arg(long)]
    pub age: u32,

    /// Narration locale, e.g. en-IN or hi-IN
    #[arg(long, default_value = "en-IN")]
    pub language: Language,

    /// Number of panels
    #[arg(long, default_value_t = 4)]
    pub panels: u32,

    /// Visual theme
    #[arg(long, default_value = "avengers")]
    pub theme: Theme,

    /// Store the finished media for this user
    #[arg(long)]
    pub user: Option<String>,
}

/// Options of `chat`
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Signed-in user; finished comics are stored for them
    #[arg(long)]
    pub user: Option<String>,

    /// Stream events instead of waiting for the whole turn
    #[arg(long)]
    pub stream: bool,
}

/// Media subcommands
#[derive(Subcommand, Debug)]
pub enum MediaCommands {
    /// List stored media as public URLs
    List {
        /// Owner of the media
        #[arg(long)]
        user: String,

        /// Restrict to one comic
        #[arg(long)]
        comic: Option<String>,
    },

    /// Delete a comic's media
    Delete {
        /// Owner of the media
        #[arg(long)]
        user: String,

        /// Comic to delete
        #[arg(long)]
        comic: String,
    },
}
