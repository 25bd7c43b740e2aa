//! Command-line interface module.

mod chat;
mod commands;
mod generate;
mod media;
mod serve;

pub use chat::run_chat;
pub use commands::{ChatArgs, Cli, Commands, GenerateArgs, MediaCommands, ServeArgs};
pub use generate::generate_comic;
pub use media::handle_media_command;
pub use serve::run_server;
