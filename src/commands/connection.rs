use anyhow::Error;

use crate::clients::openai::chat_completions::ChatCompletionClient;
use crate::repos::config::Settings;

pub async fn run(settings: &Settings) -> Result<(), Error> {
    let client = ChatCompletionClient::new(settings);
    println!("Testing {} with model {}...", settings.api_endpoint, settings.selected_model);

    let report = client.test_connection().await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.success {
        Ok(())
    } else {
        Err(Error::msg(report.message))
    }
}
