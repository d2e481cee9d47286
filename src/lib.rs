//! # Movar - plain-text dictionary loading and lookup
//!
//! This crate loads linguistic dictionaries stored as plain UTF-8 text files,
//! indexes their headwords and answers word lookups with the matching article.
//!
//! ## Dictionary Format
//!
//! Each dictionary is a `.txt` file whose first four lines are a header, followed
//! by the body:
//!
//! ```text
//! #Title:<dictionary title>
//! #Pair:<language pair, e.g. Eng-Eng>
//! #Description:<free text>
//! #Regex filter:<regular expression matching each headword>
//! <body text...>
//! ```
//!
//! Every match of the regex filter in the body is a headword. The article of a
//! headword is the body text from its first occurrence up to the next headword,
//! or to the end of the body for the last one.
//!
//! ## Quick Start
//!
//! ```no_run
//! use movar::builder::LoaderConfig;
//! use movar::readers::{DictionaryStore, Selection};
//!
//! # fn main() -> movar::Result<()> {
//! let store = DictionaryStore::new();
//! let report = store.reload(LoaderConfig::from_locations(["/usr/share/movar"])).wait()?;
//! for err in &report.errors {
//!     eprintln!("Skipped: {}", err);
//! }
//!
//! let dicts = store.snapshot();
//! for result in dicts.lookup("hello", &Selection::All) {
//!     match result.article() {
//!         Some(article) => println!("[{}]\n{}", result.title, article),
//!         None => println!("[{}] not found", result.title),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Builder modules**: [`builder`] for configuration, loading, indexing and background loads
//! - **Storage & core types**: [`storage`] for the header format, records and collections
//! - **Reader modules**: [`readers`] for the shared snapshot store, groups, lookup and completion
//! - **Utilities**: [`utils`] for file access, key folding and progress reporting
//!
//! ## Error Handling
//!
//! All fallible operations return a [`Result<T>`] type, where errors are represented by
//! [`MovarError`]. A load collects per-file errors instead of failing, so one broken
//! dictionary never keeps the others from loading.

pub mod builder;
pub mod error;
pub mod readers;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use builder::{DictionaryLoader, LoadHandle, LoadReport, LoaderConfig};
pub use readers::{DictionaryGroup, DictionaryStore, LookupResult, Selection};
pub use storage::{DictionaryCollection, DictionaryHeader, DictionaryRecord, EntryIndex, Span};

// Re-export error types for convenience
pub use error::{MovarError, Result, snafu};
