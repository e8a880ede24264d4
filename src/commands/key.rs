use anyhow::Error;
use tracing::warn;

use crate::args::KeySubCommand;
use crate::clients::openai::credentials::{validate_api_key, KeyValidation};
use crate::repos::config::Settings;

pub fn execute(settings: &Settings, key_cmd: &KeySubCommand) -> KeyValidation {
    let key = key_cmd
        .key
        .clone()
        .or_else(|| settings.resolved_api_key())
        .unwrap_or_default();
    let provider = key_cmd
        .provider
        .as_deref()
        .unwrap_or(settings.api_endpoint.as_str());
    validate_api_key(&key, provider)
}

pub fn run(settings: &Settings, key_cmd: &KeySubCommand) -> Result<(), Error> {
    let validation = execute(settings, key_cmd);
    if validation.valid {
        println!("{}", validation.message);
        Ok(())
    } else {
        warn!("API key rejected: {}", validation.message);
        Err(Error::msg(validation.message))
    }
}
