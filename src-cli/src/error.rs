//! Error types for the `passgen` shell.

use std::process::ExitCode;

use passgen_core::GeneratorError;
use thiserror::Error;

/// Errors surfaced to the user by the shell.
#[derive(Debug, Error)]
pub enum CliError {
    /// The engine rejected the request or failed to draw entropy.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Every catalog character is excluded, so generation would never end.
    #[error("the exclusion list covers every available character")]
    FullyExcluded,

    /// Writing the result to stdout failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// JSON rendering of the result failed.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FullyExcluded => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}
