//! Configuration for loading and indexing dictionaries.
//!
//! The configuration is an explicit value handed to the loader; nothing is read
//! from global settings. It can be built in code or from JSON.
//!
//! # Examples
//!
//! ```
//! use movar::builder::LoaderConfig;
//!
//! # fn main() -> movar::Result<()> {
//! let config = LoaderConfig::from_json_str(r#"{"locations": ["/usr/share/movar"], "timeout_secs": 30}"#)?;
//! assert_eq!(config.file_suffix, "txt");
//! assert_eq!(config.timeout().map(|t| t.as_secs()), Some(30));
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{MovarError, Result};

/// Default bound on the compiled size of a dictionary's entry pattern (10 MiB).
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * 1024 * 1024;

/// Configuration for a dictionary load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directories to scan, in order; later titles overwrite earlier ones
    pub locations: Vec<PathBuf>,
    /// Extension of dictionary files, without the dot (default: "txt")
    pub file_suffix: String,
    /// Upper bound on a compiled entry pattern, in bytes
    pub regex_size_limit: usize,
    /// Abort the load after this many seconds (no limit when absent)
    pub timeout_secs: Option<u64>,
    /// Percentage of work between progress reports (default: 10)
    pub progress_interval_percent: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            locations: Vec::new(),
            file_suffix: "txt".to_string(),
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            timeout_secs: None,
            progress_interval_percent: 10,
        }
    }
}

impl LoaderConfig {
    pub fn from_locations<I, P>(locations: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        LoaderConfig {
            locations: locations.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Builds a configuration from a newline-separated list of directories.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_location_lines(lines: &str) -> Self {
        Self::from_locations(
            lines.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the load timeout, rounded up to whole seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs_f64().ceil() as u64);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Checks that every value is usable by a load.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an empty or dotted file suffix, a zero
    /// regex size limit, or a progress interval above 100 percent.
    pub fn validate(&self) -> Result<()> {
        if self.file_suffix.is_empty() || self.file_suffix.starts_with('.') {
            return Err(MovarError::invalid_parameter(format!(
                "file_suffix must be a bare extension, got {:?}",
                self.file_suffix
            )));
        }
        if self.regex_size_limit == 0 {
            return Err(MovarError::invalid_parameter("regex_size_limit must be positive"));
        }
        if self.progress_interval_percent > 100 {
            return Err(MovarError::invalid_parameter(format!(
                "progress_interval_percent must be at most 100, got {}",
                self.progress_interval_percent
            )));
        }
        Ok(())
    }
}
