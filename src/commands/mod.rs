pub mod ask;
pub mod chat;
pub mod config;
pub mod connection;
pub mod key;
pub mod mcp;
