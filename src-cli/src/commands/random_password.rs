//! `passgen random-password`.
//!
//! Secrets are written straight from the exposed [`ProtectedSecret`] to the
//! output and dropped (zeroized) right after; no intermediate `String` copy
//! is made. Generated values are never logged.

use std::io::Write;

use passgen_core::{
    CharacterCatalog, ExclusionSet, GeneratedPassword, PasswordEngine, PasswordRequest,
};
use zeroize::Zeroize;

use super::ValueOutput;
use crate::cli::PasswordArgs;
use crate::error::CliError;

impl From<&PasswordArgs> for PasswordRequest {
    fn from(args: &PasswordArgs) -> Self {
        Self {
            length: args.length,
            exclude: ExclusionSet::from_strs(&args.exclude),
            shuffle: args.shuffle,
            as_plain_text: args.as_plain_text,
        }
    }
}

/// Generate a password and write it to `out`.
///
/// # Errors
///
/// Returns [`CliError::FullyExcluded`] if nothing is left to pick from,
/// [`CliError::Generator`] for a negative length or entropy failure, or
/// [`CliError::Output`]/[`CliError::Json`] if rendering fails.
pub fn run(mut args: PasswordArgs, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let request = PasswordRequest::from(&args);
    // The exclusion list may hint at the password's shape.
    for s in &mut args.exclude {
        s.zeroize();
    }

    // A zero-length request never draws, so it cannot spin on the set.
    if request.length > 0 && request.exclude.covers(CharacterCatalog::shared()) {
        tracing::warn!(
            excluded = request.exclude.len(),
            "Exclusion list leaves no characters to generate from."
        );
        return Err(CliError::FullyExcluded);
    }

    tracing::debug!(
        length = request.length,
        excluded = request.exclude.len(),
        shuffle = request.shuffle,
        plain = request.as_plain_text,
        "Generating password."
    );
    let password = PasswordEngine::new().generate(&request)?;
    write_password(&password, json, out)?;
    tracing::debug!(secret = password.is_secret(), "Password written.");
    Ok(())
}

fn write_password(
    password: &GeneratedPassword,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let value = password.expose();
    if json {
        serde_json::to_writer(&mut *out, &ValueOutput { value })?;
        writeln!(out)?;
    } else {
        out.write_all(value.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
