use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = r###"
Fozzie is a terminal chat client for any OpenAI-compatible chat completions API
(OpenAI, OpenRouter, local servers, ...).

- Ask: send a single prompt and print the reply.
- Chat: hold a multi-turn conversation on stdin.
- Test: check that your endpoint, key and model work together.
- Config: settings live in a TOML file; the API key may also come from
  OPENROUTER_API_KEY, OPENAI_API_KEY, AI_API_KEY or API_KEY.
"###
)]
pub struct Args {
    #[command(subcommand)]
    pub subcmd: Option<SubCommands>,
}

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    /// Send one prompt and print the assistant's reply.
    Ask(AskSubCommand),
    /// Start an interactive conversation.
    Chat(ChatSubCommand),
    /// Send a short test prompt to verify the connection.
    Test,
    /// Check that an API key has the expected format.
    Key(KeySubCommand),
    /// Set or get configuration values in your fozzie.toml.
    Config(ConfigSubCommand),
    /// Manage Model Context Protocol server definitions.
    #[command(subcommand)]
    Mcp(McpSubCommand),
}

#[derive(Parser, Debug)]
#[command(about = "Send one prompt and print the reply", long_about = None)]
pub struct AskSubCommand {
    /// The prompt to send
    #[arg(required = true)]
    pub prompt: Vec<String>,

    /// System prompt placed before the conversation
    #[arg(short, long)]
    pub system: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Start an interactive conversation", long_about = None)]
pub struct ChatSubCommand {
    /// System prompt placed before the conversation
    #[arg(short, long)]
    pub system: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Check an API key's format", long_about = None)]
pub struct KeySubCommand {
    /// Key to check. Defaults to the configured or environment key.
    pub key: Option<String>,

    /// Provider hint, e.g. an endpoint URL. Defaults to the configured endpoint.
    #[arg(short, long)]
    pub provider: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Set or get configuration values", long_about = None)]
pub struct ConfigSubCommand {
    /// Set a configuration value. Use the format key=value.
    /// `fozzie config --set model=openai/gpt-4o`
    #[arg(short, long)]
    pub set: Option<String>,

    /// Get your current configuration value.
    /// `fozzie config --get model`
    #[arg(short, long)]
    pub get: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum McpSubCommand {
    /// Add or replace a server definition
    Add {
        /// Name of the server
        name: String,
        /// Command that launches the server
        #[arg(short, long)]
        command: String,
        /// Space separated arguments
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        args: String,
        /// Environment variable for the server, KEY=VALUE (repeatable)
        #[arg(short, long)]
        env: Vec<String>,
    },
    /// Remove a server definition
    Remove {
        /// Name of the server
        name: String,
    },
    /// List server definitions
    List,
    /// Replace all definitions from a JSON file with an `mcpServers` object
    Import {
        /// Path to the JSON file, or `-` for stdin
        source: String,
    },
    /// Print all definitions as `mcpServers` JSON
    Export,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_joins_words() {
        let args = Args::try_parse_from(["fozzie", "ask", "--system", "be brief", "hello", "there"]).unwrap();
        match args.subcmd {
            Some(SubCommands::Ask(ask)) => {
                assert_eq!(ask.prompt.join(" "), "hello there");
                assert_eq!(ask.system.as_deref(), Some("be brief"));
            }
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn test_mcp_add() {
        let args = Args::try_parse_from([
            "fozzie", "mcp", "add", "files", "--command", "npx", "--args", "-y @mcp/fs /tmp", "-e", "A=1", "-e", "B=2",
        ])
        .unwrap();
        match args.subcmd {
            Some(SubCommands::Mcp(McpSubCommand::Add { name, command, args, env })) => {
                assert_eq!(name, "files");
                assert_eq!(command, "npx");
                assert_eq!(args, "-y @mcp/fs /tmp");
                assert_eq!(env, vec!["A=1", "B=2"]);
            }
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn test_mcp_import_from_stdin() {
        let args = Args::try_parse_from(["fozzie", "mcp", "import", "-"]).unwrap();
        match args.subcmd {
            Some(SubCommands::Mcp(McpSubCommand::Import { source })) => assert_eq!(source, "-"),
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn test_ask_requires_prompt() {
        assert!(Args::try_parse_from(["fozzie", "ask"]).is_err());
    }
}
