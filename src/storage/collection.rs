//! Title-keyed collection of loaded dictionaries.

use indexmap::IndexMap;
use indexmap::map::Entry;
use log::warn;

use crate::storage::record::DictionaryRecord;

/// Loaded dictionaries keyed by title, in load order.
///
/// A collection is built once per load and then shared read-only; see
/// [`crate::readers::DictionaryStore`].
#[derive(Debug, Clone, Default)]
pub struct DictionaryCollection {
    records: IndexMap<String, DictionaryRecord>,
}

impl DictionaryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record` under its title.
    ///
    /// A record with the same title is replaced and returned; the title keeps
    /// its original position.
    pub fn insert(&mut self, record: DictionaryRecord) -> Option<DictionaryRecord> {
        match self.records.entry(record.title().to_string()) {
            Entry::Occupied(mut slot) => {
                warn!("Dictionary title {:?} loaded twice, keeping the later file", record.title());
                Some(slot.insert(record))
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
                None
            }
        }
    }

    pub fn remove(&mut self, title: &str) -> Option<DictionaryRecord> {
        self.records.shift_remove(title)
    }

    pub fn get(&self, title: &str) -> Option<&DictionaryRecord> {
        self.records.get(title)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut DictionaryRecord> {
        self.records.get_mut(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.records.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// `"Title(Pair)"` labels of every dictionary, in load order.
    pub fn labels(&self) -> Vec<String> {
        self.records.values().map(DictionaryRecord::label).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DictionaryRecord> {
        self.records.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DictionaryRecord> {
        self.records.values_mut()
    }

    /// Drops every record for which `keep` returns `false`.
    pub fn retain<F: FnMut(&DictionaryRecord) -> bool>(&mut self, mut keep: F) {
        self.records.retain(|_, record| keep(record));
    }
}

impl FromIterator<DictionaryRecord> for DictionaryCollection {
    fn from_iter<I: IntoIterator<Item = DictionaryRecord>>(iter: I) -> Self {
        let mut collection = Self::new();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}
