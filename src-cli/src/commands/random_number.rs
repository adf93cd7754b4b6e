//! `passgen random-number`.

use std::io::Write;

use passgen_core::{random_number, NumberRequest};

use super::ValueOutput;
use crate::cli::NumberArgs;
use crate::error::CliError;

impl From<&NumberArgs> for NumberRequest {
    fn from(args: &NumberArgs) -> Self {
        Self {
            min: args.min,
            max: args.max,
        }
    }
}

/// Draw a number and write it to `out`.
///
/// # Errors
///
/// Returns [`CliError::Generator`] for an inverted range or entropy failure,
/// or [`CliError::Output`]/[`CliError::Json`] if rendering fails.
pub fn run(args: &NumberArgs, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let request = NumberRequest::from(args);
    tracing::debug!(min = request.min, max = request.max, "Generating random number.");
    let value = random_number(request.min, request.max)?;

    if json {
        serde_json::to_writer(&mut *out, &ValueOutput { value: &value })?;
        writeln!(out)?;
    } else {
        writeln!(out, "{value}")?;
    }
    Ok(())
}
