//! `passgen-core`: random password and number generation engine.
//!
//! No I/O, no async, and no logging beyond a one-time warning when `mlock`
//! is unavailable: the shell adapter owns the rest.
//! All randomness comes from the OS CSPRNG unless a caller injects its own
//! [`RandomSource`].

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod random;

pub mod catalog;

pub mod picker;

pub mod password;

pub use catalog::{CharacterCatalog, CharacterClass, CharacterItem, CATALOG_SIZE};
pub use error::GeneratorError;
pub use memory::{disable_core_dumps, ProtectedSecret};
pub use password::{
    random_password, EngineConfig, ExclusionSet, GeneratedPassword, PasswordEngine,
    PasswordRequest, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_PASSWORD_LENGTH,
};
pub use picker::CharacterPicker;
pub use random::{
    random_number, NumberRequest, OsRandom, RandomSource, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE,
};
