//! `tracing` subscriber setup.
//!
//! Logs go to stderr so stdout only ever carries the generated value.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log` nor `--verbose` is given.
pub const DEFAULT_FILTER: &str = "warn";

/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "passgen=debug,warn";

/// Pick the filter directive: an explicit directive wins, then `--verbose`.
#[must_use]
pub fn filter_directive(explicit: Option<&str>, verbose: bool) -> &str {
    match explicit {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ if verbose => VERBOSE_FILTER,
        _ => DEFAULT_FILTER,
    }
}

/// Install the global fmt subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(explicit: Option<&str>, verbose: bool) {
    let directive = filter_directive(explicit, verbose);
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("passgen: invalid log filter '{directive}': {e}, using '{DEFAULT_FILTER}'");
        EnvFilter::new(DEFAULT_FILTER)
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
