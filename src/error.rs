//! Error types and result type for the movar crate.
//!
//! This module defines all error variants that can occur while loading, indexing
//! and querying plain-text dictionaries. It uses the `snafu` library for ergonomic
//! error handling with automatic backtrace capture.
//!
//! # Examples
//!
//! ```
//! use movar::{Result, MovarError};
//!
//! fn read_dictionary() -> Result<String> {
//!     Err(MovarError::malformed_header("english.txt", "missing #Title line"))
//! }
//!
//! match read_dictionary() {
//!     Ok(data) => println!("Success: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! # Error Variants
//!
//! Per-file variants are collected into a load report and never stop a load:
//!
//! - [`MovarError::FileRead`]: a dictionary file could not be opened, mapped or decoded
//! - [`MovarError::MalformedHeader`]: the four header lines violate the header format
//! - [`MovarError::RegexCompilation`]: a dictionary's `#Regex filter` is not a valid pattern
//! - [`MovarError::DirectoryRead`]: a configured location could not be listed
//!
//! The remaining variants fail the operation they come from:
//!
//! - [`MovarError::UserInterrupted`] / [`MovarError::Timeout`]: a load was cancelled or ran too long
//! - [`MovarError::LoadFailed`]: the background load worker could not report back
//! - [`MovarError::ParserError`]: configuration JSON could not be parsed
//! - [`MovarError::InvalidParameter`]: a configuration value is out of range

use std::io;
use std::path::Path;

use snafu::{Backtrace, Snafu};

// Re-export snafu for context providers
pub use snafu;

/// Main error type for the movar crate.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum MovarError {
    /// I/O error that is not tied to a particular dictionary file.
    #[snafu(display("IO error: {source}"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// A dictionary file could not be opened, mapped or decoded as UTF-8.
    #[snafu(display("Failed to read dictionary file {filename}: {source}"))]
    FileRead {
        filename: String,
        source: io::Error,
        backtrace: Backtrace,
    },

    /// The first four lines of a dictionary file are not a valid header.
    #[snafu(display("Malformed header in dictionary file {filename}: {message}"))]
    MalformedHeader {
        filename: String,
        message: String,
        backtrace: Backtrace,
    },

    /// A dictionary's entry pattern could not be compiled.
    #[snafu(display("Invalid regex filter {pattern:?} in dictionary {title}: {source}"))]
    RegexCompilation {
        title: String,
        pattern: String,
        source: regex::Error,
        backtrace: Backtrace,
    },

    /// A configured dictionary location could not be listed.
    #[snafu(display("Failed to read dictionary directory {path}: {message}"))]
    DirectoryRead {
        path: String,
        message: String,
        backtrace: Backtrace,
    },

    /// Error parsing JSON configuration.
    #[snafu(display("Parser error: {source}"))]
    ParserError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        backtrace: Backtrace,
    },

    /// A loader configuration value is out of range.
    #[snafu(display("Invalid parameter: {message}"))]
    InvalidParameter {
        message: String,
        backtrace: Backtrace,
    },

    /// Operation was interrupted by user.
    #[snafu(display("User interrupted"))]
    UserInterrupted {
        backtrace: Backtrace,
    },

    /// Operation exceeded its time limit.
    #[snafu(display("Timed out after {seconds:.1}s"))]
    Timeout {
        seconds: f64,
        backtrace: Backtrace,
    },

    /// The background load did not deliver a result.
    #[snafu(display("Dictionary load failed: {message}"))]
    LoadFailed {
        message: String,
        backtrace: Backtrace,
    },
}

impl From<io::Error> for MovarError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, backtrace: Backtrace::capture() }
    }
}

impl From<serde_json::Error> for MovarError {
    fn from(source: serde_json::Error) -> Self {
        Self::ParserError {
            source: Box::new(source),
            backtrace: Backtrace::capture(),
        }
    }
}

/// Helper methods for creating errors without context providers.
impl MovarError {
    /// Creates a `FileRead` error for the file at `path`.
    pub fn file_read<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Self::FileRead {
            filename: display_file_name(path.as_ref()),
            source,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `MalformedHeader` error with the given message.
    ///
    /// # Examples
    ///
    /// ```
    /// use movar::MovarError;
    ///
    /// let error = MovarError::malformed_header("english.txt", "line 2 has no ':' separator");
    /// assert_eq!(error.filename(), Some("english.txt"));
    /// ```
    pub fn malformed_header<F: Into<String>, S: Into<String>>(filename: F, message: S) -> Self {
        Self::MalformedHeader {
            filename: filename.into(),
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `RegexCompilation` error for the dictionary `title`.
    pub fn regex_compilation<T: Into<String>, P: Into<String>>(title: T, pattern: P, source: regex::Error) -> Self {
        Self::RegexCompilation {
            title: title.into(),
            pattern: pattern.into(),
            source,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `DirectoryRead` error for the location at `path`.
    pub fn directory_read<P: AsRef<Path>, S: Into<String>>(path: P, message: S) -> Self {
        Self::DirectoryRead {
            path: path.as_ref().display().to_string(),
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidParameter` error with the given message.
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `UserInterrupted` error.
    pub fn user_interrupted() -> Self {
        Self::UserInterrupted {
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `Timeout` error for an operation that ran `seconds` long.
    pub fn timeout(seconds: f64) -> Self {
        Self::Timeout {
            seconds,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `LoadFailed` error with the given message.
    pub fn load_failed<S: Into<String>>(message: S) -> Self {
        Self::LoadFailed {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Name of the dictionary file or title this error concerns, if any.
    pub fn filename(&self) -> Option<&str> {
        match self {
            MovarError::FileRead { filename, .. } | MovarError::MalformedHeader { filename, .. } => Some(filename.as_str()),
            MovarError::RegexCompilation { title, .. } => Some(title.as_str()),
            MovarError::DirectoryRead { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Whether this error only affects one dictionary or location.
    ///
    /// Such errors are reported and the load carries on with the rest.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            MovarError::FileRead { .. }
                | MovarError::MalformedHeader { .. }
                | MovarError::RegexCompilation { .. }
                | MovarError::DirectoryRead { .. }
        )
    }

    /// Checks if this error is a `UserInterrupted` variant.
    pub fn is_user_interrupted(&self) -> bool {
        matches!(self, MovarError::UserInterrupted { .. })
    }

    /// Checks if this error is a `Timeout` variant.
    pub fn is_timeout(&self) -> bool {
        matches!(self, MovarError::Timeout { .. })
    }
}

fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A specialized `Result` type for movar operations.
///
/// This is a convenience type alias that uses [`MovarError`] as the error type.
pub type Result<T> = std::result::Result<T, MovarError>;
