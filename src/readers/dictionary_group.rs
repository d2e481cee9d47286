//! Dictionary groups and lookup scopes.
//!
//! A group is a named subset of loaded dictionary titles. Groups are defined by
//! the settings layer, which stores members as `"Title(Pair)"` labels; only the
//! title part is used to select dictionaries.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::storage::collection::DictionaryCollection;
use crate::storage::record::DictionaryRecord;

/// A named subset of dictionary titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryGroup {
    pub name: String,
    pub titles: IndexSet<String>,
}

impl DictionaryGroup {
    pub fn new<S, I, T>(name: S, titles: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a group from `"Title(Pair)"` labels.
    ///
    /// Everything from the first `(` on is dropped; a label without `(` is taken
    /// as a bare title.
    pub fn from_labels<S, I, T>(name: S, labels: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self::new(
            name,
            labels.into_iter().map(|label| title_from_label(label.as_ref()).to_string()),
        )
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    pub fn insert<T: Into<String>>(&mut self, title: T) -> bool {
        self.titles.insert(title.into())
    }

    pub fn remove(&mut self, title: &str) -> bool {
        self.titles.shift_remove(title)
    }
}

/// Title part of a `"Title(Pair)"` label.
pub fn title_from_label(label: &str) -> &str {
    label.split_once('(').map_or(label, |(title, _)| title)
}

/// Which loaded dictionaries a query runs against.
#[derive(Debug, Clone, Copy, Default)]
pub enum Selection<'a> {
    /// Every loaded dictionary
    #[default]
    All,
    /// Only the dictionaries of one group; unknown titles are ignored
    Group(&'a DictionaryGroup),
}

impl Selection<'_> {
    pub fn includes(&self, title: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Group(group) => group.contains(title),
        }
    }

    /// Selected dictionaries of `collection`, in load order.
    pub fn select<'c>(&self, collection: &'c DictionaryCollection) -> Vec<&'c DictionaryRecord> {
        collection.iter()
            .filter(|record| self.includes(record.title()))
            .collect()
    }
}
