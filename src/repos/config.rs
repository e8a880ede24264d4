use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Error};
use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clients::openai::credentials::api_key_from_env;
use crate::models::mcp_server::McpServer;

const FOZZIE_CONFIG: &str = "FOZZIE_CONFIG";

pub const SETTING_KEYS: [&str; 7] = [
    "api_endpoint",
    "api_key",
    "selected_model",
    "max_tokens",
    "temperature",
    "fozzie_mode",
    "theme",
];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::msg(format!("Unknown theme '{}', expected light or dark", other))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_selected_model")]
    pub selected_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub fozzie_mode: bool,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mcp_servers: BTreeMap<String, McpServer>,
}

fn default_api_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_selected_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_max_tokens() -> u32 {
    2048
}
fn default_temperature() -> f64 {
    0.7
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_endpoint: default_api_endpoint(),
            api_key: None,
            selected_model: default_selected_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            fozzie_mode: false,
            theme: Theme::default(),
            mcp_servers: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn get(&self, key: &str) -> Result<String, Error> {
        let value = match key {
            "api_endpoint" => self.api_endpoint.clone(),
            "api_key" => self.masked_api_key(),
            "selected_model" | "model" => self.selected_model.clone(),
            "max_tokens" => self.max_tokens.to_string(),
            "temperature" => self.temperature.to_string(),
            "fozzie_mode" => self.fozzie_mode.to_string(),
            "theme" => self.theme.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let value = value.trim();
        match key {
            "api_endpoint" => {
                url::Url::parse(value)
                    .with_context(|| format!("'{}' is not a valid endpoint URL", value))?;
                self.api_endpoint = value.trim_end_matches('/').to_string();
            }
            "api_key" => {
                self.api_key = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "selected_model" | "model" => {
                if value.is_empty() {
                    return Err(Error::msg("Model must not be empty"));
                }
                self.selected_model = value.to_string();
            }
            "max_tokens" => {
                let max_tokens: u32 = value
                    .parse()
                    .with_context(|| format!("max_tokens must be a positive integer, got '{}'", value))?;
                if max_tokens == 0 {
                    return Err(Error::msg("max_tokens must be a positive integer"));
                }
                self.max_tokens = max_tokens;
            }
            "temperature" => {
                let temperature: f64 = value
                    .parse()
                    .with_context(|| format!("temperature must be a number, got '{}'", value))?;
                if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
                    return Err(Error::msg("temperature must be between 0.0 and 2.0"));
                }
                self.temperature = temperature;
            }
            "fozzie_mode" => {
                self.fozzie_mode = value
                    .parse()
                    .with_context(|| format!("fozzie_mode must be true or false, got '{}'", value))?;
            }
            "theme" => self.theme = value.parse()?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            None | Some("") => "(not set)".to_string(),
            Some(key) if key.chars().count() <= 12 => "****".to_string(),
            Some(key) => {
                let head: String = key.chars().take(6).collect();
                let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
                format!("{}...{}", head, tail)
            }
        }
    }

    /// Configured key when present, otherwise the first key found in the
    /// environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(api_key_from_env)
    }

    pub fn with_resolved_api_key(mut self) -> Self {
        self.api_key = self.resolved_api_key();
        self
    }

    pub fn add_mcp_server(&mut self, name: &str, server: McpServer) -> Result<Option<McpServer>, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::msg("MCP server name must not be empty"));
        }
        Ok(self.mcp_servers.insert(name.to_string(), server))
    }

    pub fn remove_mcp_server(&mut self, name: &str) -> Result<McpServer, Error> {
        self.mcp_servers
            .remove(name.trim())
            .ok_or_else(|| Error::msg(format!("No MCP server named '{}'", name)))
    }
}

fn unknown_key(key: &str) -> Error {
    Error::msg(format!(
        "Unknown setting '{}'. Known settings: {}",
        key,
        SETTING_KEYS.join(", ")
    ))
}

pub fn get_fozzie_config_path() -> PathBuf {
    if let Ok(path) = env::var(FOZZIE_CONFIG) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    let mut path = config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("fozzie");
    path.push("fozzie.toml");
    path
}

/// Reads settings from `path`, writing the defaults there first if the
/// file does not exist yet.
pub fn load_settings_from(path: &Path) -> Result<Settings, Error> {
    if !path.exists() {
        info!("No config at {}, writing defaults", path.display());
        let settings = Settings::default();
        save_settings_to(path, &settings)?;
        return Ok(settings);
    }

    debug!("Loading config from {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    if settings.max_tokens == 0 {
        return Err(Error::msg(format!(
            "max_tokens in {} must be a positive integer",
            path.display()
        )));
    }
    if !(0.0..=2.0).contains(&settings.temperature) {
        warn!("Configured temperature {} is outside 0.0-2.0", settings.temperature);
    }
    Ok(settings)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
    }
    let toml_str = toml::to_string_pretty(settings)?;
    fs::write(path, toml_str)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}

pub fn load_settings() -> Result<Settings, Error> {
    load_settings_from(&get_fozzie_config_path())
}

pub fn save_settings(settings: &Settings) -> Result<(), Error> {
    save_settings_to(&get_fozzie_config_path(), settings)
}
