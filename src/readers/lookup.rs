//! Word lookup and headword completion across loaded dictionaries.
//!
//! # Examples
//!
//! ```
//! use movar::storage::{DictionaryCollection, DictionaryHeader, DictionaryRecord, EntryIndex, Span};
//! use movar::readers::Selection;
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
//! let collection: DictionaryCollection =
//!     [DictionaryRecord::with_index(header, "wordA text1 wordB text2".to_string(), index)]
//!         .into_iter()
//!         .collect();
//!
//! let results = collection.lookup("WordA", &Selection::All);
//! assert_eq!(results[0].article(), Some("wordA text1 "));
//! assert_eq!(collection.suggest("wo", &Selection::All, 10), vec!["worda", "wordb"]);
//! ```

use indexmap::IndexSet;

use crate::readers::dictionary_group::Selection;
use crate::storage::collection::DictionaryCollection;
use crate::utils::sort_key::{completes, get_sort_key};

/// Result of looking a word up in one dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Article<'a> {
    Found(&'a str),
    NotFound,
}

/// Per-dictionary lookup outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupResult<'a> {
    pub title: &'a str,
    pub article: Article<'a>,
}

impl<'a> LookupResult<'a> {
    pub fn article(&self) -> Option<&'a str> {
        match self.article {
            Article::Found(text) => Some(text),
            Article::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.article, Article::Found(_))
    }
}

/// Whether any of `results` found an article.
pub fn any_found(results: &[LookupResult<'_>]) -> bool {
    results.iter().any(LookupResult::is_found)
}

impl DictionaryCollection {
    /// Looks `word` up in every selected dictionary.
    ///
    /// Returns one result per selected dictionary in load order, each holding the
    /// article or a not-found marker. The lookup is case-insensitive and never
    /// modifies any index.
    pub fn lookup<'a>(&'a self, word: &str, selection: &Selection<'_>) -> Vec<LookupResult<'a>> {
        selection.select(self)
            .into_iter()
            .map(|record| LookupResult {
                title: record.title(),
                article: record.article(word).map_or(Article::NotFound, Article::Found),
            })
            .collect()
    }

    /// Headwords of the selected dictionaries that complete `prefix`.
    ///
    /// A headword matches when it starts with the lower-cased prefix, either as
    /// is or with its non-word characters removed. Results are unique across
    /// dictionaries, ordered by their folded form and capped at `limit`.
    /// An empty prefix yields nothing.
    pub fn suggest(&self, prefix: &str, selection: &Selection<'_>, limit: usize) -> Vec<String> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let mut found = IndexSet::new();
        for record in selection.select(self) {
            for key in record.index().keys() {
                if completes(key, prefix) {
                    found.insert(key);
                }
            }
        }
        let mut found: Vec<&str> = found.into_iter().collect();
        found.sort_by(|a, b| get_sort_key(a).cmp(&get_sort_key(b)).then_with(|| a.cmp(b)));
        found.into_iter().take(limit).map(str::to_string).collect()
    }
}
