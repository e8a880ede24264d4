use anyhow::Error;
use tracing::{error, info};

use crate::args::AskSubCommand;
use crate::clients::openai::chat_completions::ChatCompletionClient;
use crate::clients::openai::types::Message;
use crate::repos::config::Settings;
use crate::utils::{apply_fozzie_mode, build_conversation};

pub async fn execute(client: &ChatCompletionClient<'_>, prompt: &str, system: Option<&str>) -> Result<String, Error> {
    let messages = build_conversation(system, &[Message::user(prompt)]);
    let reply = client.send(&messages).await?;
    Ok(reply)
}

pub async fn run(settings: &Settings, ask_cmd: &AskSubCommand) -> Result<(), Error> {
    let prompt = ask_cmd.prompt.join(" ");
    let client = ChatCompletionClient::new(settings);
    info!("Asking {}", settings.selected_model);

    match execute(&client, &prompt, ask_cmd.system.as_deref()).await {
        Ok(reply) => {
            if settings.fozzie_mode {
                println!("{}", apply_fozzie_mode(&reply));
            } else {
                println!("{}", reply);
            }
            Ok(())
        }
        Err(e) => {
            error!("Error executing command: {}", e);
            Err(e)
        }
    }
}
