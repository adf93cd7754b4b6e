//! Error types for `passgen-core`.

use thiserror::Error;

/// Errors produced by number and password generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The requested range is empty (`min > max`).
    #[error("invalid range: min ({min}) must not exceed max ({max})")]
    InvalidRange {
        /// Requested lower bound.
        min: i32,
        /// Requested upper bound.
        max: i32,
    },

    /// A generation parameter is out of its domain (negative length).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The OS entropy source failed to produce random bytes.
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// Protected secret allocation failure.
    #[error("secure memory error: {0}")]
    SecureMemory(String),

    /// A generation worker thread panicked before producing its characters.
    #[error("generation worker panicked")]
    Worker,
}
