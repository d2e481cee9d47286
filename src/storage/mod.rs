// Storage and core data structures for loaded dictionaries
//
// This module provides the header format, the per-dictionary record with its
// headword index, and the title-keyed collection produced by a load.

pub mod header;
pub mod record;
pub mod collection;

pub use header::DictionaryHeader;
pub use record::{DictionaryRecord, EntryIndex, Span};
pub use collection::DictionaryCollection;
