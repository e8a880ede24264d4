use anyhow::Error;
use clap::Parser;
use tracing::{debug, warn};

use args::{Args, ChatSubCommand, SubCommands};
use repos::config::load_settings;

mod args;
mod clients;
mod commands;
mod models;
mod repos;
mod utils;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "fozzie=info".to_string())
        )
        .init();

    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to load .env file: {}", e),
    }

    let args = Args::parse();
    let mut settings = load_settings()?;

    match args.subcmd {
        Some(SubCommands::Ask(ask_cmd)) => {
            let settings = settings.with_resolved_api_key();
            commands::ask::run(&settings, &ask_cmd).await?;
        }
        Some(SubCommands::Chat(chat_cmd)) => {
            let settings = settings.with_resolved_api_key();
            commands::chat::run(&settings, &chat_cmd).await?;
        }
        Some(SubCommands::Test) => {
            let settings = settings.with_resolved_api_key();
            commands::connection::run(&settings).await?;
        }
        Some(SubCommands::Key(key_cmd)) => {
            commands::key::run(&settings, &key_cmd)?;
        }
        Some(SubCommands::Config(config_cmd)) => {
            commands::config::run(&mut settings, &config_cmd)?;
        }
        Some(SubCommands::Mcp(mcp_cmd)) => {
            commands::mcp::run(&mut settings, &mcp_cmd)?;
        }
        None => {
            let settings = settings.with_resolved_api_key();
            commands::chat::run(&settings, &ChatSubCommand { system: None }).await?;
        }
    };
    Ok(())
}
