use std::collections::BTreeMap;

use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};

/// A Model Context Protocol server definition: how to launch it, not a
/// running instance.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct McpServer {
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl McpServer {
    pub fn new(command: &str, args: &str, env: &[String]) -> Result<Self, Error> {
        let command = command.trim();
        if command.is_empty() {
            return Err(Error::msg("MCP server command must not be empty"));
        }
        Ok(McpServer {
            command: command.to_string(),
            args: parse_args(args),
            env: parse_env(env)?,
        })
    }

    pub fn display_args(&self) -> String {
        self.args.join(" ")
    }
}

/// Whole-set exchange format shared with other MCP clients:
/// `{"mcpServers": {name: {command, args, env}}}`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct McpConfig {
    #[serde(rename = "mcpServers", default, skip_serializing_if = "Option::is_none")]
    pub mcp_servers: Option<BTreeMap<String, McpServer>>,
}

/// Servers listed under `mcpServers`, or `None` when the document has no
/// such key.
pub fn parse_mcp_config(json: &str) -> Result<Option<BTreeMap<String, McpServer>>, Error> {
    let config: McpConfig = serde_json::from_str(json).context("Invalid JSON configuration")?;
    if let Some(servers) = &config.mcp_servers {
        for (name, server) in servers {
            if name.trim().is_empty() || server.command.trim().is_empty() {
                return Err(Error::msg(format!(
                    "MCP server '{}' needs a name and a command",
                    name
                )));
            }
        }
    }
    Ok(config.mcp_servers)
}

pub fn export_mcp_config(servers: &BTreeMap<String, McpServer>) -> Result<String, Error> {
    let config = McpConfig {
        mcp_servers: Some(servers.clone()),
    };
    Ok(serde_json::to_string_pretty(&config)?)
}

pub fn parse_args(args: &str) -> Vec<String> {
    args.split_whitespace().map(str::to_string).collect()
}

pub fn parse_env(pairs: &[String]) -> Result<BTreeMap<String, String>, Error> {
    let mut env = BTreeMap::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                env.insert(key.trim().to_string(), value.to_string());
            }
            _ => {
                return Err(Error::msg(format!(
                    "Invalid environment entry '{}', expected KEY=VALUE",
                    pair
                )))
            }
        }
    }
    Ok(env)
}
