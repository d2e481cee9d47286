//! Shared, atomically replaced view of the loaded dictionaries.
//!
//! Readers take a [`DictionaryStore::snapshot`] and query it for as long as they
//! like. A reload builds a complete new collection in the background and swaps it
//! in only when the load succeeds; until then every snapshot still sees the
//! previous collection.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use movar::builder::LoaderConfig;
//! use movar::readers::{DictionaryStore, Selection};
//!
//! # fn main() -> movar::Result<()> {
//! let store = DictionaryStore::new();
//! let handle = store.reload(LoaderConfig::from_location_lines("/usr/share/movar"));
//! let report = handle.wait_timeout(Duration::from_secs(60))?;
//! println!("{:?} failed", report.failed_files());
//!
//! let suggestions = store.snapshot().suggest("hel", &Selection::All, 20);
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, RwLock};

use log::info;

use crate::builder::dictionary_loader::DictionaryLoader;
use crate::builder::load_task::{LoadHandle, LoadLock};
use crate::builder::loader_config::LoaderConfig;
use crate::storage::collection::DictionaryCollection;

/// Holder of the current dictionary collection.
///
/// Cloning the store is cheap and every clone shares the same collection and
/// the same load lock.
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    current: Arc<RwLock<Arc<DictionaryCollection>>>,
    load_lock: LoadLock,
}

impl DictionaryStore {
    /// Creates a store holding an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current collection. The snapshot stays valid across later reloads.
    pub fn snapshot(&self) -> Arc<DictionaryCollection> {
        match self.current.read() {
            Ok(current) => Arc::clone(&*current),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Replaces the current collection.
    pub fn publish(&self, collection: Arc<DictionaryCollection>) {
        let mut current = match self.current.write() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };
        *current = collection;
    }

    /// Starts a background load with `config`.
    ///
    /// Loads started through the same store run one at a time. The new
    /// collection is published before the handle is signalled, and only when the
    /// load completes without being cancelled or timing out.
    pub fn reload(&self, config: LoaderConfig) -> LoadHandle {
        self.reload_with(DictionaryLoader::new(config))
    }

    /// Like [`DictionaryStore::reload`] with a preconfigured loader.
    pub fn reload_with(&self, loader: DictionaryLoader) -> LoadHandle {
        let store = self.clone();
        LoadHandle::spawn(loader, self.load_lock.clone(), move |outcome| {
            if let Ok(report) = outcome {
                info!("Publishing {} dictionaries", report.collection.len());
                store.publish(Arc::clone(&report.collection));
            }
        })
    }
}
