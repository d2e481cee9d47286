//! Dictionary records and their headword index.
//!
//! This module provides the core data structures for a loaded dictionary:
//! - [`Span`]: a half-open byte range over a dictionary body
//! - [`EntryIndex`]: headword to span mapping in document order
//! - [`DictionaryRecord`]: header metadata, body text and index of one dictionary
//!
//! # Examples
//!
//! ```
//! use movar::storage::{DictionaryHeader, DictionaryRecord, EntryIndex, Span};
//!
//! let header = DictionaryHeader {
//!     title: "Demo".to_string(),
//!     language_pair: "Eng-Eng".to_string(),
//!     description: String::new(),
//!     entry_pattern: "word[AB]".to_string(),
//! };
//! let index: EntryIndex = [("worda", Span::new(0, 5)), ("wordb", Span::new(12, 17))]
//!     .into_iter()
//!     .collect();
//! let record = DictionaryRecord::with_index(header, "wordA text1 wordB text2".to_string(), index);
//! assert_eq!(record.article("WordA"), Some("wordA text1 "));
//! assert_eq!(record.article("wordb"), Some("wordB text2"));
//! assert_eq!(record.article("wordc"), None);
//! ```

use std::ops::Range;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::storage::header::DictionaryHeader;

/// Half-open byte range `[start, end)` over a dictionary body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Ordered mapping from lower-cased headword to the span where it occurs.
///
/// Keys keep the order in which they were first inserted, which for a built
/// index is the document order of first occurrence. Article boundaries rely on
/// that order: an article ends where the next key's span starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryIndex {
    entries: IndexMap<String, Span>,
}

impl EntryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an occurrence of `key` at `span`.
    ///
    /// A new key gets `span` as is. A known key keeps its first start and its
    /// end moves to `span.end`, so the span covers every repetition.
    pub fn record(&mut self, key: String, span: Span) {
        self.entries
            .entry(key)
            .and_modify(|existing| existing.end = span.end)
            .or_insert(span);
    }

    pub fn get(&self, key: &str) -> Option<Span> {
        self.entries.get(key).copied()
    }

    /// Position of `key` in insertion order together with its span.
    pub fn position(&self, key: &str) -> Option<(usize, Span)> {
        self.entries.get_full(key).map(|(pos, _, span)| (pos, *span))
    }

    /// Start of the entry following `position`, if there is one.
    pub fn next_start(&self, position: usize) -> Option<usize> {
        self.entries.get_index(position + 1).map(|(_, span)| span.start)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Span)> {
        self.entries.iter().map(|(key, span)| (key.as_str(), *span))
    }
}

impl<K: Into<String>> FromIterator<(K, Span)> for EntryIndex {
    /// Builds an index from spans given in document order.
    ///
    /// Repeated keys are folded the same way as [`EntryIndex::record`] does.
    fn from_iter<I: IntoIterator<Item = (K, Span)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (key, span) in iter {
            index.record(key.into(), span);
        }
        index
    }
}

/// One loaded dictionary: header metadata, immutable body and headword index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryRecord {
    pub header: DictionaryHeader,
    body: String,
    index: EntryIndex,
}

impl DictionaryRecord {
    /// Creates a record with an empty index.
    pub fn new(header: DictionaryHeader, body: String) -> Self {
        Self::with_index(header, body, EntryIndex::new())
    }

    pub fn with_index(header: DictionaryHeader, body: String, index: EntryIndex) -> Self {
        Self { header, body, index }
    }

    pub fn title(&self) -> &str {
        &self.header.title
    }

    pub fn language_pair(&self) -> &str {
        &self.header.language_pair
    }

    pub fn description(&self) -> &str {
        &self.header.description
    }

    pub fn entry_pattern(&self) -> &str {
        &self.header.entry_pattern
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn index(&self) -> &EntryIndex {
        &self.index
    }

    /// Replaces the derived index. The body is left untouched.
    pub fn set_index(&mut self, index: EntryIndex) {
        self.index = index;
    }

    /// Display label used by group settings, e.g. `"Oxford(Eng-Eng)"`.
    pub fn label(&self) -> String {
        self.header.label()
    }

    /// Returns the article for `word`, or `None` if the word is not a headword.
    ///
    /// The article runs from the headword's first occurrence to the start of the
    /// next headword in index order, or to the end of the body for the last one.
    /// The lookup is case-insensitive.
    pub fn article(&self, word: &str) -> Option<&str> {
        let key = word.to_lowercase();
        let (position, span) = self.index.position(&key)?;
        let end = self.index.next_start(position).unwrap_or(self.body.len());
        self.body.get(span.start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> DictionaryHeader {
        DictionaryHeader {
            title: "Test".to_string(),
            language_pair: "Eng-Eng".to_string(),
            description: "test".to_string(),
            entry_pattern: "word[AB]".to_string(),
        }
    }

    fn sample() -> DictionaryRecord {
        let index: EntryIndex = [("worda", Span::new(0, 5)), ("wordb", Span::new(12, 17))]
            .into_iter()
            .collect();
        DictionaryRecord::with_index(header(), "wordA text1 wordB text2".to_string(), index)
    }

    #[test]
    fn test_article_boundaries() {
        let record = sample();
        assert_eq!(record.article("worda"), Some("wordA text1 "));
        assert_eq!(record.article("wordb"), Some("wordB text2"));
    }

    #[test]
    fn test_article_case_insensitive() {
        let record = sample();
        assert_eq!(record.article("WordA"), record.article("worda"));
        assert_eq!(record.article("WORDB"), Some("wordB text2"));
    }

    #[test]
    fn test_not_found_leaves_index_alone() {
        let record = sample();
        let before = record.index().clone();
        assert_eq!(record.article("wordc"), None);
        assert_eq!(record.article(""), None);
        assert_eq!(record.index(), &before);
    }

    #[test]
    fn test_record_extends_repeated_key() {
        let mut index = EntryIndex::new();
        index.record("alpha".to_string(), Span::new(0, 5));
        index.record("beta".to_string(), Span::new(6, 10));
        index.record("alpha".to_string(), Span::new(14, 19));
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("alpha"), Some(Span::new(0, 19)));
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["alpha", "beta"]);
        assert_eq!(index.position("beta"), Some((1, Span::new(6, 10))));
        assert_eq!(index.next_start(0), Some(6));
        assert_eq!(index.next_start(1), None);
    }

    #[test]
    fn test_multibyte_body() {
        let body = "кіт — cat\nпес — dog\n".to_string();
        let second = body.find("пес").unwrap();
        let index: EntryIndex = [("кіт", Span::new(0, "кіт".len())), ("пес", Span::new(second, second + "пес".len()))]
            .into_iter()
            .collect();
        let record = DictionaryRecord::with_index(header(), body, index);
        assert_eq!(record.article("КІТ"), Some("кіт — cat\n"));
        assert_eq!(record.article("пес"), Some("пес — dog\n"));
    }
}
