//! Interactive input.
//!
//! Commands read from a [`Prompter`] so the login loop and password entry can
//! be driven by scripted answers in tests.

use crate::error::{CliError, Result as CliErrorResult};

use dialoguer::{Confirm, Input, Password};

pub trait Prompter {
    fn input(&self, label: &str) -> CliErrorResult<String>;

    /// Read without echo.
    fn secret(&self, label: &str) -> CliErrorResult<String>;

    fn confirm(&self, label: &str) -> CliErrorResult<bool>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, label: &str) -> CliErrorResult<String> {
        Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CliError::prompt(e.to_string()))
    }

    fn secret(&self, label: &str) -> CliErrorResult<String> {
        Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| CliError::prompt(e.to_string()))
    }

    fn confirm(&self, label: &str) -> CliErrorResult<bool> {
        Confirm::new()
            .with_prompt(label)
            .default(false)
            .interact()
            .map_err(|e| CliError::prompt(e.to_string()))
    }
}

/// Ask for a new password twice and check it.
pub fn prompt_new_password<P: Prompter + ?Sized>(
    prompter: &P,
    min_length: usize,
) -> CliErrorResult<String> {
    let password = prompter.secret("New password")?;
    let confirmation = prompter.secret("Repeat password")?;

    validate_new_password(&password, &confirmation, min_length)?;

    Ok(password)
}

pub fn validate_new_password(
    password: &str,
    confirmation: &str,
    min_length: usize,
) -> CliErrorResult<()> {
    if password.chars().count() < min_length {
        return Err(CliError::input(format!(
            "password must be at least {} characters",
            min_length
        )));
    }

    if password != confirmation {
        return Err(CliError::input("passwords do not match"));
    }

    Ok(())
}
