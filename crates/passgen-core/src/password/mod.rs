//! Random password generation.
//!
//! A password is produced in three steps:
//! 1. Every position is filled independently by repeated picks until the
//!    picked character is not excluded (fanned out over scoped worker
//!    threads for long passwords).
//! 2. Optionally, the buffer is shuffled (Fisher-Yates, indices drawn from
//!    the same [`RandomSource`]).
//! 3. The characters are returned as plain text or sealed into a
//!    [`ProtectedSecret`].
//!
//! The working buffer is zeroized in every mode; only the returned value
//! outlives a call.

pub mod exclusion;

use std::fmt;
use std::num::NonZeroUsize;
use std::thread;

use zeroize::Zeroizing;

use crate::catalog::CharacterCatalog;
use crate::error::GeneratorError;
use crate::memory::ProtectedSecret;
use crate::picker::CharacterPicker;
use crate::random::{OsRandom, RandomSource};

pub use exclusion::ExclusionSet;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default password length.
pub const DEFAULT_PASSWORD_LENGTH: i32 = 12;

/// Default minimum length before generation is fanned out to worker threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Parameters of a single password request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordRequest {
    /// Number of characters (must not be negative).
    pub length: i32,
    /// Characters that must not appear in the password.
    pub exclude: ExclusionSet,
    /// Shuffle the generated characters before returning them.
    pub shuffle: bool,
    /// Return plain text instead of a [`ProtectedSecret`].
    pub as_plain_text: bool,
}

impl Default for PasswordRequest {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            exclude: ExclusionSet::new(),
            shuffle: false,
            as_plain_text: false,
        }
    }
}

/// Tuning for the position fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on concurrently running generation workers.
    pub max_workers: NonZeroUsize,
    /// Passwords shorter than this are generated on the calling thread.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_workers: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// The result of a generation call. Owned by the caller.
pub enum GeneratedPassword {
    /// Plain text, returned only when explicitly requested.
    Plain(String),
    /// Sealed, zero-on-drop secret (the default).
    Secret(ProtectedSecret),
}

impl GeneratedPassword {
    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Plain(s) => s.chars().count(),
            Self::Secret(s) => s.len(),
        }
    }

    /// Returns `true` for a zero-length password.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the password is held in a [`ProtectedSecret`].
    #[must_use]
    pub const fn is_secret(&self) -> bool {
        matches!(self, Self::Secret(_))
    }

    /// Expose the characters regardless of representation.
    #[must_use]
    pub fn expose(&self) -> &str {
        match self {
            Self::Plain(s) => s,
            Self::Secret(s) => s.expose(),
        }
    }

    /// Take the plain text, if this is a plain result.
    #[must_use]
    pub fn into_plain(self) -> Option<String> {
        match self {
            Self::Plain(s) => Some(s),
            Self::Secret(_) => None,
        }
    }

    /// Take the secret, if this is a protected result.
    #[must_use]
    pub fn into_secret(self) -> Option<ProtectedSecret> {
        match self {
            Self::Plain(_) => None,
            Self::Secret(s) => Some(s),
        }
    }
}

impl fmt::Debug for GeneratedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(_) => f.write_str("GeneratedPassword::Plain(***)"),
            Self::Secret(_) => f.write_str("GeneratedPassword::Secret(***)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Generates passwords from a catalog and a random source.
///
/// Holds no mutable state: every call is an independent pick, shuffle and
/// encode pipeline, and one engine may serve concurrent callers.
#[derive(Debug)]
pub struct PasswordEngine<'c, R: RandomSource = OsRandom> {
    catalog: &'c CharacterCatalog,
    source: R,
    config: EngineConfig,
}

impl PasswordEngine<'static, OsRandom> {
    /// Engine over the shared catalog and the OS CSPRNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(CharacterCatalog::shared(), OsRandom)
    }
}

impl Default for PasswordEngine<'static, OsRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c, R: RandomSource> PasswordEngine<'c, R> {
    /// Engine over an explicit catalog and random source.
    #[must_use]
    pub fn with_parts(catalog: &'c CharacterCatalog, source: R) -> Self {
        Self {
            catalog,
            source,
            config: EngineConfig::default(),
        }
    }

    /// Replace the fan-out configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The catalog passwords are drawn from.
    #[must_use]
    pub const fn catalog(&self) -> &'c CharacterCatalog {
        self.catalog
    }

    /// Generate a password as described by `request`.
    ///
    /// An exclusion set covering the whole catalog makes this loop forever;
    /// check [`ExclusionSet::covers`] first when the set is user-supplied.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidArgument`] if `request.length` is
    /// negative, [`GeneratorError::Entropy`] if the random source fails, or
    /// [`GeneratorError::Worker`] if a generation thread panics.
    pub fn generate(&self, request: &PasswordRequest) -> Result<GeneratedPassword, GeneratorError> {
        let chars = self.generate_chars(request.length, &request.exclude, request.shuffle)?;
        if request.as_plain_text {
            Ok(GeneratedPassword::Plain(chars.iter().collect()))
        } else {
            ProtectedSecret::seal(&chars).map(GeneratedPassword::Secret)
        }
    }

    /// Generate a password as plain text.
    ///
    /// # Errors
    ///
    /// See [`PasswordEngine::generate`].
    pub fn generate_plain(
        &self,
        length: i32,
        exclude: &ExclusionSet,
        shuffle: bool,
    ) -> Result<String, GeneratorError> {
        let chars = self.generate_chars(length, exclude, shuffle)?;
        Ok(chars.iter().collect())
    }

    /// Generate a password sealed into a [`ProtectedSecret`].
    ///
    /// # Errors
    ///
    /// See [`PasswordEngine::generate`].
    pub fn generate_secret(
        &self,
        length: i32,
        exclude: &ExclusionSet,
        shuffle: bool,
    ) -> Result<ProtectedSecret, GeneratorError> {
        let chars = self.generate_chars(length, exclude, shuffle)?;
        ProtectedSecret::seal(&chars)
    }

    /// Uniformly permute `chars` in place.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Entropy`] if the random source fails.
    pub fn shuffle(&self, chars: &mut [char]) -> Result<(), GeneratorError> {
        for i in (1..chars.len()).rev() {
            let j = self.source.next_index(i)?;
            chars.swap(i, j);
        }
        Ok(())
    }

    fn generate_chars(
        &self,
        length: i32,
        exclude: &ExclusionSet,
        shuffle: bool,
    ) -> Result<Zeroizing<Vec<char>>, GeneratorError> {
        let length = usize::try_from(length).map_err(|_| {
            GeneratorError::InvalidArgument(format!("length must not be negative, got {length}"))
        })?;

        let mut chars = Zeroizing::new(vec!['\0'; length]);
        self.fill(&mut chars, exclude)?;
        if shuffle {
            self.shuffle(&mut chars)?;
        }
        Ok(chars)
    }

    /// Fill every position, fanning out over scoped workers when the buffer
    /// is long enough. Each worker owns a disjoint chunk of positions.
    fn fill(&self, buffer: &mut [char], exclude: &ExclusionSet) -> Result<(), GeneratorError> {
        let picker = CharacterPicker::new(self.catalog, &self.source);
        let workers = self.worker_count(buffer.len());
        if workers <= 1 {
            return fill_positions(&picker, buffer, exclude);
        }

        let chunk_len = buffer.len().div_ceil(workers);
        let picker = &picker;
        thread::scope(|scope| {
            let handles: Vec<_> = buffer
                .chunks_mut(chunk_len)
                .map(|chunk| scope.spawn(move || fill_positions(picker, chunk, exclude)))
                .collect();
            // Join every worker before reporting, so no panic escapes the scope.
            let results: Vec<_> = handles.into_iter().map(thread::ScopedJoinHandle::join).collect();
            results
                .into_iter()
                .try_for_each(|joined| joined.map_err(|_| GeneratorError::Worker)?)
        })
    }

    fn worker_count(&self, positions: usize) -> usize {
        if positions < self.config.parallel_threshold {
            1
        } else {
            self.config.max_workers.get().min(positions)
        }
    }
}

/// Pick each position until it lands outside `exclude`.
fn fill_positions<R: RandomSource>(
    picker: &CharacterPicker<'_, R>,
    positions: &mut [char],
    exclude: &ExclusionSet,
) -> Result<(), GeneratorError> {
    for slot in positions.iter_mut() {
        *slot = loop {
            let c = picker.pick()?;
            if !exclude.contains(c) {
                break c;
            }
        };
    }
    Ok(())
}

/// Generate a password with the shared catalog and the OS CSPRNG.
///
/// Returns a [`ProtectedSecret`] unless `request.as_plain_text` is set.
///
/// # Errors
///
/// See [`PasswordEngine::generate`].
pub fn random_password(request: &PasswordRequest) -> Result<GeneratedPassword, GeneratorError> {
    PasswordEngine::new().generate(request)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
