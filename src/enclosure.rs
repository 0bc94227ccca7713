//! Enclosure registry: the bracket and quote pairs that may wrap a URL.
//!
//! Each `UrlExtractor` owns its own registry, so two extractors with
//! different enclosure sets never see each other's changes.

use std::collections::BTreeSet;
use std::fmt;

use log::debug;
use thiserror::Error;

/// Pairs registered by [`EnclosureRegistry::default`].
///
/// `<>` covers `<user@host>` mail addresses; `\\`, `` ` `` and the quotes
/// are symmetric.
pub const DEFAULT_ENCLOSURES: &[(char, char)] = &[
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('<', '>'),
    ('"', '"'),
    ('\'', '\''),
    ('\\', '\\'),
    ('`', '`'),
];

/// An ordered (open, close) character pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnclosurePair {
    pub open: char,
    pub close: char,
}

impl EnclosurePair {
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// Quote-like pair whose open and close characters are the same.
    pub fn is_symmetric(&self) -> bool {
        self.open == self.close
    }

    /// Parse a pair from two strings of exactly one character each.
    pub fn parse(open: &str, close: &str) -> Result<Self, EnclosureError> {
        Ok(Self::new(single_char(open)?, single_char(close)?))
    }
}

impl fmt::Display for EnclosurePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.open, self.close)
    }
}

impl From<(char, char)> for EnclosurePair {
    fn from((open, close): (char, char)) -> Self {
        Self::new(open, close)
    }
}

fn single_char(s: &str) -> Result<char, EnclosureError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(EnclosureError::InvalidCharacter(s.to_string())),
    }
}

/// Errors from mutating an [`EnclosureRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnclosureError {
    /// `remove` was called for a pair the registry does not hold.
    #[error("enclosure pair {open:?} {close:?} is not registered")]
    NotRegistered { open: String, close: String },

    /// An enclosure side was not exactly one character.
    #[error("enclosure character must be exactly one char, got {0:?}")]
    InvalidCharacter(String),
}

/// The set of enclosure pairs a resolver consults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosureRegistry {
    pairs: BTreeSet<EnclosurePair>,
}

impl Default for EnclosureRegistry {
    fn default() -> Self {
        DEFAULT_ENCLOSURES.iter().copied().collect()
    }
}

impl FromIterator<(char, char)> for EnclosureRegistry {
    fn from_iter<I: IntoIterator<Item = (char, char)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(EnclosurePair::from).collect(),
        }
    }
}

impl EnclosureRegistry {
    /// Registry holding no pairs at all.
    pub fn empty() -> Self {
        Self {
            pairs: BTreeSet::new(),
        }
    }

    /// Insert a pair. Adding a pair that is already present does nothing.
    pub fn add(&mut self, open: char, close: char) {
        if self.pairs.insert(EnclosurePair::new(open, close)) {
            debug!("enclosure: added {open:?} {close:?}");
        }
    }

    /// Remove a pair.
    ///
    /// Fails with [`EnclosureError::NotRegistered`] if the exact pair is not
    /// present; the registry is left as it was.
    pub fn remove(&mut self, open: char, close: char) -> Result<(), EnclosureError> {
        if !self.pairs.remove(&EnclosurePair::new(open, close)) {
            return Err(EnclosureError::NotRegistered {
                open: open.to_string(),
                close: close.to_string(),
            });
        }
        debug!("enclosure: removed {open:?} {close:?}");
        Ok(())
    }

    /// [`add`](Self::add) taking one-character strings.
    pub fn add_str(&mut self, open: &str, close: &str) -> Result<(), EnclosureError> {
        let pair = EnclosurePair::parse(open, close)?;
        self.add(pair.open, pair.close);
        Ok(())
    }

    /// [`remove`](Self::remove) taking one-character strings.
    ///
    /// Strings that are not a single char can never name a registered pair,
    /// so they fail the same way an absent pair does (`("", "")` included).
    pub fn remove_str(&mut self, open: &str, close: &str) -> Result<(), EnclosureError> {
        let not_registered = || EnclosureError::NotRegistered {
            open: open.to_string(),
            close: close.to_string(),
        };
        let pair = EnclosurePair::parse(open, close).map_err(|_| not_registered())?;
        self.remove(pair.open, pair.close)
            .map_err(|_| not_registered())
    }

    /// Owned copy of the current pairs. Changing it does not touch the registry.
    pub fn snapshot(&self) -> BTreeSet<EnclosurePair> {
        self.pairs.clone()
    }

    pub fn contains(&self, open: char, close: char) -> bool {
        self.pairs.contains(&EnclosurePair::new(open, close))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnclosurePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// True if `c` opens some asymmetric pair.
    pub(crate) fn is_opener(&self, c: char) -> bool {
        self.pairs.iter().any(|p| !p.is_symmetric() && p.open == c)
    }

    /// True if `c` closes some asymmetric pair.
    pub(crate) fn is_closer(&self, c: char) -> bool {
        self.pairs.iter().any(|p| !p.is_symmetric() && p.close == c)
    }

    /// True if `c` is registered as a symmetric (quote-like) pair.
    pub(crate) fn is_symmetric_token(&self, c: char) -> bool {
        self.contains(c, c)
    }
}
