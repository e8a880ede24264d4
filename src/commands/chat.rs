use anyhow::Error;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use crate::args::ChatSubCommand;
use crate::clients::openai::chat_completions::ChatCompletionClient;
use crate::clients::openai::types::Message;
use crate::repos::config::Settings;
use crate::utils::{apply_fozzie_mode, build_conversation, message_to_string};

#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Exit,
    Reset,
    History,
    Skip,
    Prompt(&'a str),
}

pub fn parse_input(line: &str) -> Input<'_> {
    match line.trim() {
        "" => Input::Skip,
        "/exit" | "/quit" => Input::Exit,
        "/reset" => Input::Reset,
        "/history" => Input::History,
        prompt => Input::Prompt(prompt),
    }
}

/// In-memory conversation for one chat session. Nothing is persisted.
#[derive(Debug, Default)]
pub struct Conversation {
    system: Option<String>,
    history: Vec<Message>,
}

impl Conversation {
    pub fn new(system: Option<String>) -> Self {
        Conversation {
            system,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Sends `prompt` with the whole history. The user turn is kept only
    /// when a reply arrives, so a failed send can simply be retried.
    pub async fn turn(&mut self, client: &ChatCompletionClient<'_>, prompt: &str) -> Result<String, Error> {
        self.history.push(Message::user(prompt));
        let messages = build_conversation(self.system.as_deref(), &self.history);
        match client.send(&messages).await {
            Ok(reply) => {
                self.history.push(Message::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e.into())
            }
        }
    }
}

pub async fn run(settings: &Settings, chat_cmd: &ChatSubCommand) -> Result<(), Error> {
    let client = ChatCompletionClient::new(settings);
    let mut conversation = Conversation::new(chat_cmd.system.clone());
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    info!("Chatting with {} via {}", settings.selected_model, settings.api_endpoint);
    println!("Type /exit to quit, /reset to start over, /history to review.");

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            Input::Exit => break,
            Input::Skip => continue,
            Input::Reset => {
                conversation.reset();
                println!("Conversation cleared.");
            }
            Input::History => {
                for message in conversation.history() {
                    println!("{}", message_to_string(message));
                }
            }
            Input::Prompt(prompt) => match conversation.turn(&client, prompt).await {
                Ok(reply) => {
                    if settings.fozzie_mode {
                        println!("{}", apply_fozzie_mode(&reply));
                    } else {
                        println!("{}", reply);
                    }
                }
                Err(e) => {
                    error!("Error sending message: {}", e);
                    println!("Sorry, I encountered an error: {}", e);
                }
            },
        }
    }
    Ok(())
}
