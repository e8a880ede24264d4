use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Error};
use tracing::{info, warn};

use crate::args::McpSubCommand;
use crate::models::mcp_server::{export_mcp_config, parse_mcp_config, McpServer};
use crate::repos::config::{save_settings, Settings};

fn read_source(source: &str) -> Result<String, Error> {
    if source == "-" {
        let mut json = String::new();
        io::stdin().read_to_string(&mut json).context("Failed to read stdin")?;
        Ok(json)
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))
    }
}

/// Replaces every definition with the `mcpServers` object in `json`.
/// Returns false and leaves `settings` untouched when the key is absent.
pub fn import_config(settings: &mut Settings, json: &str) -> Result<bool, Error> {
    match parse_mcp_config(json)? {
        Some(servers) => {
            info!("Imported {} MCP servers", servers.len());
            settings.mcp_servers = servers;
            Ok(true)
        }
        None => {
            warn!("No mcpServers key found, nothing imported");
            Ok(false)
        }
    }
}

pub fn execute(settings: &mut Settings, mcp_cmd: &McpSubCommand) -> Result<bool, Error> {
    match mcp_cmd {
        McpSubCommand::Add { name, command, args, env } => {
            let server = McpServer::new(command, args, env)?;
            if settings.add_mcp_server(name, server)?.is_some() {
                info!("Replaced MCP server {}", name);
            } else {
                info!("Added MCP server {}", name);
            }
            Ok(true)
        }
        McpSubCommand::Remove { name } => {
            settings.remove_mcp_server(name)?;
            info!("Removed MCP server {}", name);
            Ok(true)
        }
        McpSubCommand::Import { source } => import_config(settings, &read_source(source)?),
        McpSubCommand::List | McpSubCommand::Export => Ok(false),
    }
}

pub fn run(settings: &mut Settings, mcp_cmd: &McpSubCommand) -> Result<(), Error> {
    if execute(settings, mcp_cmd)? {
        save_settings(settings)?;
        return Ok(());
    }

    if let McpSubCommand::Export = mcp_cmd {
        println!("{}", export_mcp_config(&settings.mcp_servers)?);
        return Ok(());
    }

    if settings.mcp_servers.is_empty() {
        println!("No MCP servers configured");
    }
    for (name, server) in &settings.mcp_servers {
        println!("{}", name);
        println!("  command: {}", server.command);
        if !server.args.is_empty() {
            println!("  args: {}", server.display_args());
        }
        if !server.env.is_empty() {
            println!("  env: {}", serde_json::to_string(&server.env)?);
        }
    }
    Ok(())
}
