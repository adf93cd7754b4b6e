//! Single-character selection.
//!
//! A pick is two draws: the class first (each of the three classes with
//! probability 1/3), then an index within that class's alphabet. Classes are
//! not weighted by size, so any single digit is more likely than any single
//! letter.

use crate::catalog::{CharacterCatalog, CharacterClass};
use crate::error::GeneratorError;
use crate::random::RandomSource;

/// Highest value the class selector draws.
const CLASS_SELECTOR_MAX: i32 = 2;

/// Picks characters from a catalog using a random source.
#[derive(Debug)]
pub struct CharacterPicker<'a, R: RandomSource> {
    catalog: &'a CharacterCatalog,
    source: &'a R,
}

impl<'a, R: RandomSource> CharacterPicker<'a, R> {
    /// Create a picker over `catalog` drawing from `source`.
    #[must_use]
    pub const fn new(catalog: &'a CharacterCatalog, source: &'a R) -> Self {
        Self { catalog, source }
    }

    /// Draw a character class, each with probability 1/3.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Entropy`] if the random source fails.
    pub fn pick_class(&self) -> Result<CharacterClass, GeneratorError> {
        let drawn = self.source.next_in_range(0, CLASS_SELECTOR_MAX)?;
        usize::try_from(drawn)
            .ok()
            .and_then(CharacterClass::from_index)
            .ok_or_else(|| GeneratorError::InvalidArgument(format!("class selector {drawn}")))
    }

    /// Draw one character: a class, then a uniform index within it.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Entropy`] if the random source fails.
    pub fn pick(&self) -> Result<char, GeneratorError> {
        let class = self.pick_class()?;
        let alphabet = self.catalog.alphabet(class);
        let upper = alphabet.len().checked_sub(1).ok_or_else(|| {
            GeneratorError::InvalidArgument(format!("{class:?} alphabet is empty"))
        })?;
        let index = self.source.next_index(upper)?;
        alphabet
            .get(index)
            .map(|item| item.character())
            .ok_or_else(|| GeneratorError::InvalidArgument(format!("index {index} out of range")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
