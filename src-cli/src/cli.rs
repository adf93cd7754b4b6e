//! Command-line surface of the `passgen` binary.

use clap::{ArgAction, Args, Parser, Subcommand};

use passgen_core::{DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE, DEFAULT_PASSWORD_LENGTH};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "PASSGEN_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "passgen",
    version,
    about = "Generate random passwords and numbers from the OS CSPRNG"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        short,
        long,
        global = true,
        help = "Print progress messages to stderr"
    )]
    pub verbose: bool,
    #[arg(
        long,
        global = true,
        env = LOG_ENV,
        help = "Log filter directive (overrides --verbose), e.g. `passgen=debug`"
    )]
    pub log: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a random integer in [MIN, MAX].
    RandomNumber(NumberArgs),
    /// Print a random password.
    RandomPassword(PasswordArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct NumberArgs {
    #[arg(
        default_value_t = DEFAULT_MIN_VALUE,
        allow_negative_numbers = true,
        help = "Smallest value that can be returned"
    )]
    pub min: i32,
    #[arg(
        default_value_t = DEFAULT_MAX_VALUE,
        allow_negative_numbers = true,
        help = "Largest value that can be returned"
    )]
    pub max: i32,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PasswordArgs {
    #[arg(
        default_value_t = DEFAULT_PASSWORD_LENGTH,
        allow_negative_numbers = true,
        help = "Number of characters"
    )]
    pub length: i32,
    #[arg(
        short = 'x',
        long,
        action = ArgAction::Append,
        help = "Characters to leave out; repeat to add more, every character of every value is excluded"
    )]
    pub exclude: Vec<String>,
    #[arg(long, help = "Shuffle the generated characters")]
    pub shuffle: bool,
    #[arg(long, help = "Return plain text instead of a protected secret")]
    pub as_plain_text: bool,
}
