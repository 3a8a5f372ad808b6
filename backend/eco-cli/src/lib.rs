//! eco-cli library
//!
//! Command parsing, the login session and command handlers behind the `eco`
//! binary.

pub mod actions;
pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod prompt;
pub mod session;
pub mod user_commands;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use error::{CliError, Result};
