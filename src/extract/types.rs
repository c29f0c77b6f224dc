//! Extractor types
//!
//! The error taxonomy for lookups over API documents, and the
//! finite match id sequence read from a player document.

use serde_json::Value;
use thiserror::Error;

/// Why a lookup over an API document produced no value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// An expected structural element is absent
    #[error("missing field: {path}")]
    MissingField { path: String },

    /// A scan for a unique element found no candidate
    #[error("not found: {what}")]
    NotFound { what: String },

    /// An element exists but has an unexpected shape or type
    #[error("malformed field '{path}': expected {expected}")]
    Malformed { path: String, expected: String },
}

impl ExtractError {
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn malformed(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            expected: expected.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for extractor functions
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// A player's match ids, oldest first
///
/// The API lists a player's matches newest first; this view walks them in
/// reverse. Every entry has been checked to carry a string `id`, so
/// iteration cannot fail. Calling [`MatchIds::iter`] again restarts the
/// sequence from the beginning.
#[derive(Debug, Clone, Copy)]
pub struct MatchIds<'a> {
    entries: &'a [Value],
}

impl<'a> MatchIds<'a> {
    pub(crate) fn new(entries: &'a [Value]) -> Self {
        Self { entries }
    }

    /// Iterate match ids, oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a str> + 'a {
        let entries: &'a [Value] = self.entries;
        entries
            .iter()
            .rev()
            .filter_map(|entry| entry.get("id").and_then(Value::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect into owned ids
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }
}

impl<'a> IntoIterator for MatchIds<'a> {
    type Item = &'a str;
    type IntoIter = Box<dyn DoubleEndedIterator<Item = &'a str> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
