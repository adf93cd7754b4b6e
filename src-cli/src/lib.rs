//! PASSGEN shell: thin command-line adapter over `passgen-core`.
//!
//! Binds arguments, sets up logging, and renders results. All generation
//! happens in `passgen-core`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

use std::io::Write;

use cli::{Cli, Commands};
use error::CliError;

/// Run a parsed command, writing its result to `out`.
///
/// # Errors
///
/// Returns the [`CliError`] of the command that failed.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    match cli.command {
        Commands::RandomNumber(args) => commands::random_number::run(&args, cli.json, out),
        Commands::RandomPassword(args) => commands::random_password::run(args, cli.json, out),
    }
}
