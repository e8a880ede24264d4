pub mod chat_completions;
pub mod credentials;
pub mod error;
pub mod provider;
pub mod types;
