//! The fixed character space passwords are drawn from.
//!
//! Three alphabets cover the 94 printable ASCII characters:
//!
//! | Class  | Code points                          | Items |
//! |--------|--------------------------------------|-------|
//! | Alpha  | 65–90, 97–122                        | 52    |
//! | Digit  | 48–57                                | 10    |
//! | Symbol | 33–47, 58–64, 91–96, 123–126         | 32    |
//!
//! The catalog is built once, deterministically, and never mutated. The
//! process-wide instance is parsed lazily via `OnceLock`; engines may also
//! be handed an explicitly built catalog.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const ALPHA_RANGES: &[RangeInclusive<u8>] = &[65..=90, 97..=122];
const DIGIT_RANGES: &[RangeInclusive<u8>] = &[48..=57];
const SYMBOL_RANGES: &[RangeInclusive<u8>] = &[33..=47, 58..=64, 91..=96, 123..=126];

/// Total number of characters across all three alphabets.
pub const CATALOG_SIZE: usize = 94;

static SHARED_CATALOG: OnceLock<CharacterCatalog> = OnceLock::new();

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The alphabet a character belongs to.
///
/// The discriminants are the values the class selector draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    /// Letters (A-Z, a-z).
    Alpha = 0,
    /// Digits (0-9).
    Digit = 1,
    /// Punctuation and other printable symbols.
    Symbol = 2,
}

impl CharacterClass {
    /// All classes in selector order.
    pub const ALL: [Self; 3] = [Self::Alpha, Self::Digit, Self::Symbol];

    /// Map a selector draw (`0..=2`) to its class.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Alpha),
            1 => Some(Self::Digit),
            2 => Some(Self::Symbol),
            _ => None,
        }
    }

    const fn ranges(self) -> &'static [RangeInclusive<u8>] {
        match self {
            Self::Alpha => ALPHA_RANGES,
            Self::Digit => DIGIT_RANGES,
            Self::Symbol => SYMBOL_RANGES,
        }
    }
}

/// One entry of the catalog: a code point and its rendered character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterItem {
    code_point: u8,
}

impl CharacterItem {
    const fn new(code_point: u8) -> Self {
        Self { code_point }
    }

    /// The code point of this character.
    #[must_use]
    pub fn code_point(self) -> u32 {
        u32::from(self.code_point)
    }

    /// The rendered character.
    #[must_use]
    pub fn character(self) -> char {
        char::from(self.code_point)
    }
}

impl fmt::Display for CharacterItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.character())
    }
}

/// The three ordered alphabets (letters, digits, symbols).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCatalog {
    alpha: Box<[CharacterItem]>,
    digits: Box<[CharacterItem]>,
    symbols: Box<[CharacterItem]>,
}

impl CharacterCatalog {
    /// Build the catalog from the fixed code-point ranges.
    #[must_use]
    pub fn build() -> Self {
        Self {
            alpha: items_for(CharacterClass::Alpha),
            digits: items_for(CharacterClass::Digit),
            symbols: items_for(CharacterClass::Symbol),
        }
    }

    /// Returns the process-wide catalog, building it on first access.
    #[must_use]
    pub fn shared() -> &'static Self {
        SHARED_CATALOG.get_or_init(Self::build)
    }

    /// The ordered items of one class, ascending by code point.
    #[must_use]
    pub fn alphabet(&self, class: CharacterClass) -> &[CharacterItem] {
        match class {
            CharacterClass::Alpha => &self.alpha,
            CharacterClass::Digit => &self.digits,
            CharacterClass::Symbol => &self.symbols,
        }
    }

    /// Iterate over every item, letters first, then digits, then symbols.
    pub fn iter(&self) -> impl Iterator<Item = &CharacterItem> {
        self.alpha
            .iter()
            .chain(self.digits.iter())
            .chain(self.symbols.iter())
    }

    /// Number of items across all alphabets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alpha
            .len()
            .saturating_add(self.digits.len())
            .saturating_add(self.symbols.len())
    }

    /// Always `false` for a built catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a character anywhere in the catalog.
    #[must_use]
    pub fn lookup(&self, code_point: u32) -> Option<CharacterItem> {
        self.iter()
            .find(|item| item.code_point() == code_point)
            .copied()
    }

    /// Find a character within a single alphabet.
    #[must_use]
    pub fn lookup_in(&self, class: CharacterClass, code_point: u32) -> Option<CharacterItem> {
        self.alphabet(class)
            .iter()
            .find(|item| item.code_point() == code_point)
            .copied()
    }

    /// The class a character belongs to, or `None` if it is not in the catalog.
    #[must_use]
    pub fn classify(&self, c: char) -> Option<CharacterClass> {
        let code_point = u32::from(c);
        CharacterClass::ALL
            .into_iter()
            .find(|&class| self.lookup_in(class, code_point).is_some())
    }
}

impl Default for CharacterCatalog {
    fn default() -> Self {
        Self::build()
    }
}

fn items_for(class: CharacterClass) -> Box<[CharacterItem]> {
    class
        .ranges()
        .iter()
        .cloned()
        .flatten()
        .map(CharacterItem::new)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
