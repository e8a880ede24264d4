use anyhow::Error;
use tracing::info;

use crate::args::ConfigSubCommand;
use crate::repos::config::{get_fozzie_config_path, save_settings, Settings, SETTING_KEYS};

/// Applies `--set key=value` to `settings`, returning the key that changed.
pub fn apply_set(settings: &mut Settings, assignment: &str) -> Result<String, Error> {
    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| Error::msg(format!("Expected key=value, got '{}'", assignment)))?;
    let key = key.trim();
    settings.set(key, value)?;
    Ok(key.to_string())
}

pub fn run(settings: &mut Settings, config_cmd: &ConfigSubCommand) -> Result<(), Error> {
    if let Some(assignment) = &config_cmd.set {
        let key = apply_set(settings, assignment)?;
        save_settings(settings)?;
        info!("Updated {}", key);
        println!("{} = {}", key, settings.get(&key)?);
    }

    if let Some(key) = &config_cmd.get {
        println!("{}", settings.get(key.trim())?);
    }

    if config_cmd.set.is_none() && config_cmd.get.is_none() {
        println!("# {}", get_fozzie_config_path().display());
        for key in SETTING_KEYS {
            println!("{} = {}", key, settings.get(key)?);
        }
        println!("mcp_servers = {}", settings.mcp_servers.len());
    }
    Ok(())
}
