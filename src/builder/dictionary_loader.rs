//! Loading dictionaries from their configured locations.
//!
//! [`DictionaryLoader`] scans every configured directory for dictionary files,
//! parses each file's header, indexes its body and collects the results into a
//! [`DictionaryCollection`]. A file that cannot be read, has a malformed header or
//! an invalid entry pattern is reported in the [`LoadReport`] and skipped; the
//! other files still load. Only cancellation and timeouts stop a load early.
//!
//! # Examples
//!
//! ```no_run
//! use movar::builder::{DictionaryLoader, LoaderConfig};
//!
//! # fn main() -> movar::Result<()> {
//! let config = LoaderConfig::from_locations(["/usr/share/movar"]);
//! let report = DictionaryLoader::new(config).load()?;
//! for err in &report.errors {
//!     eprintln!("{}", err);
//! }
//! println!("{} dictionaries loaded", report.collection.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};

use crate::builder::index_builder::index_record;
use crate::builder::loader_config::LoaderConfig;
use crate::storage::collection::DictionaryCollection;
use crate::storage::header::DictionaryHeader;
use crate::storage::record::DictionaryRecord;
use crate::utils::io_utils::{scan_dir, with_mapped_text};
use crate::utils::progress_report::{CancelFlag, ProgressReportFn, ProgressState};
use crate::{MovarError, Result};

/// Outcome of a completed load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Every dictionary that loaded and indexed successfully
    pub collection: Arc<DictionaryCollection>,
    /// Per-file and per-location errors, in the order they occurred
    pub errors: Vec<MovarError>,
}

impl LoadReport {
    /// Whether every file loaded without error.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Names of the files, titles or locations that failed.
    pub fn failed_files(&self) -> Vec<&str> {
        self.errors.iter().filter_map(MovarError::filename).collect()
    }
}

/// Reads one dictionary file into a record with an empty index.
///
/// The file is memory-mapped for the duration of the parse; only the body text
/// is copied out.
///
/// # Errors
///
/// Returns `FileRead` if the file cannot be opened, mapped or decoded, and
/// `MalformedHeader` if its first four lines are not a valid header.
pub fn read_dictionary_file<P: AsRef<Path>>(path: P) -> Result<DictionaryRecord> {
    let path = path.as_ref();
    let filename = path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    with_mapped_text(path, |text| {
        let (header, body) = DictionaryHeader::parse(text, &filename)?;
        Ok(DictionaryRecord::new(header, body.to_string()))
    })
}

/// Loads and indexes every dictionary found in the configured locations.
pub struct DictionaryLoader {
    config: LoaderConfig,
    cancel: CancelFlag,
    reporter: Option<ProgressReportFn>,
}

impl DictionaryLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
            reporter: None,
        }
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_reporter(mut self, reporter: ProgressReportFn) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Runs the load to completion.
    ///
    /// # Errors
    ///
    /// Per-file problems never fail the load; they are returned in
    /// [`LoadReport::errors`]. The load fails with `InvalidParameter` for an
    /// unusable configuration, with `UserInterrupted` when the cancel flag is
    /// raised and with `Timeout` when the configured timeout passes.
    pub fn load(&self) -> Result<LoadReport> {
        self.config.validate()?;
        if self.cancel.is_cancelled() {
            return Err(MovarError::user_interrupted());
        }
        let started = Instant::now();
        let deadline = self.config.timeout().map(|timeout| started + timeout);
        let mut collection = DictionaryCollection::new();
        let mut errors = Vec::new();

        let files = self.collect_files(&mut errors);
        debug!("Found {} dictionary files", files.len());

        let mut progress = ProgressState::new(
            "loading",
            files.len() as u64,
            self.config.progress_interval_percent,
            self.reporter,
        )
        .with_cancel_flag(self.cancel.clone())
        .with_deadline(deadline);

        for (n, path) in files.iter().enumerate() {
            progress.check(n as u64)?;
            match self.load_one(path, &progress) {
                Ok(record) => {
                    info!(
                        "Loaded dictionary {:?} ({}) with {} headwords from {}",
                        record.title(),
                        record.language_pair(),
                        record.index().len(),
                        path.display()
                    );
                    collection.insert(record);
                }
                Err(err) if err.is_per_file() => {
                    warn!("Skipping {}: {}", path.display(), err);
                    errors.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            "Loaded {} dictionaries with {} errors in {:.2}s",
            collection.len(),
            errors.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(LoadReport {
            collection: Arc::new(collection),
            errors,
        })
    }

    fn collect_files(&self, errors: &mut Vec<MovarError>) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for location in &self.config.locations {
            debug!("Scanning {}", location.display());
            match scan_dir(location, &self.config.file_suffix) {
                Ok(found) => files.extend(found),
                Err(err) => {
                    warn!("Skipping location {}: {}", location.display(), err);
                    errors.push(err);
                }
            }
        }
        files
    }

    fn load_one(&self, path: &Path, progress: &ProgressState) -> Result<DictionaryRecord> {
        let mut record = read_dictionary_file(path)?;
        index_record(&mut record, &self.config, progress)?;
        Ok(record)
    }
}
