//! Characters a caller wants kept out of a generated password.

use std::collections::BTreeSet;

use crate::catalog::CharacterCatalog;

/// A read-only set of rejected characters.
///
/// Serializes as a list of one-character strings. When built from strings,
/// every character of every string is excluded, so `["O0", "l1"]` and
/// `["O", "0", "l", "1"]` are the same set.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExclusionSet {
    chars: BTreeSet<char>,
}

impl ExclusionSet {
    /// An empty set: nothing is excluded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chars: BTreeSet::new(),
        }
    }

    /// Exclude every character of every given string.
    pub fn from_strs<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        strings
            .into_iter()
            .flat_map(|s| s.as_ref().chars().collect::<Vec<_>>())
            .collect()
    }

    /// Returns `true` if `c` must not appear in the password.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Number of distinct excluded characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Excluded characters in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    /// Returns `true` if every character of `catalog` is excluded.
    ///
    /// Generation with such a set never terminates; callers check this
    /// before asking the engine for a password.
    #[must_use]
    pub fn covers(&self, catalog: &CharacterCatalog) -> bool {
        catalog.iter().all(|item| self.contains(item.character()))
    }
}

impl FromIterator<char> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}

impl Extend<char> for ExclusionSet {
    fn extend<T: IntoIterator<Item = char>>(&mut self, iter: T) {
        self.chars.extend(iter);
    }
}

impl From<Vec<String>> for ExclusionSet {
    fn from(strings: Vec<String>) -> Self {
        Self::from_strs(strings)
    }
}

impl From<ExclusionSet> for Vec<String> {
    fn from(set: ExclusionSet) -> Self {
        set.chars.iter().map(char::to_string).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
