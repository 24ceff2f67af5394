//! Command handlers. Each translates arguments, calls the core, and renders.

pub mod apply;
pub mod config;
pub mod decode;
pub mod encode;
pub mod suggest;

mod sources;

use std::io::{self, IsTerminal as _};

use crate::error::{CliError, CliResult, IoContext as _};

pub(crate) use sources::Sources;

/// Ask a yes/no question on the terminal. Defaults to yes.
pub(crate) fn confirm(prompt: &str) -> CliResult<bool> {
    if !io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "confirmation needs an interactive terminal; pass --yes".into(),
            source: None,
        });
    }
    ask(prompt).io_context("failed to read confirmation input")
}

#[cfg(feature = "interactive")]
fn ask(prompt: &str) -> io::Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| io::Error::other(e.to_string()))
}

#[cfg(not(feature = "interactive"))]
fn ask(prompt: &str) -> io::Result<bool> {
    use std::io::Write as _;

    print!("{prompt} [Y/n] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}
