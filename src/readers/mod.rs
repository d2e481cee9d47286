// Query side of the crate
//
// This module provides the shared snapshot store, dictionary groups that scope
// queries, and word lookup and completion over a loaded collection.

pub mod store;
pub mod dictionary_group;
pub mod lookup;

pub use store::DictionaryStore;
pub use dictionary_group::{DictionaryGroup, Selection, title_from_label};
pub use lookup::{Article, LookupResult, any_found};
