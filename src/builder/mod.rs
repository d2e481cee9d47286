//! Builder module for loading and indexing dictionaries
//!
//! This module contains everything that turns dictionary files on disk into a
//! loaded collection: configuration, the per-file loader, the headword index
//! builder and the background load task.

pub mod loader_config;
pub mod dictionary_loader;
pub mod index_builder;
pub mod load_task;

// Re-export commonly used types for convenience
pub use loader_config::LoaderConfig;
pub use dictionary_loader::{DictionaryLoader, LoadReport, read_dictionary_file};
pub use index_builder::{build_index, compile_entry_pattern, index_record};
pub use load_task::{LoadHandle, LoadLock};
