//! Progress reporting and cancellation for long-running loads.
//!
//! Loading and indexing a set of dictionaries can take a while for large files.
//! [`ProgressState`] calls an optional reporter at regular intervals and lets the
//! load stop early when the shared [`CancelFlag`] is raised, when the reporter
//! asks for it, or when a deadline passes.
//!
//! # Examples
//!
//! ```
//! use movar::utils::progress_report::{CancelFlag, ProgressState};
//!
//! fn my_reporter(state: &mut ProgressState) -> bool {
//!     println!("{}: {}/{}", state.state_id, state.current, state.total);
//!     false // Return true to cancel the operation
//! }
//!
//! let cancel = CancelFlag::new();
//! let mut progress = ProgressState::new("indexing", 100, 10, Some(my_reporter))
//!     .with_cancel_flag(cancel.clone());
//! for i in 0..100 {
//!     if progress.check(i).is_err() {
//!         break;
//!     }
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::{MovarError, Result};

/// Function type for progress reporting callbacks.
///
/// The function receives a mutable reference to the progress state and
/// returns `true` to cancel the operation, or `false` to continue.
pub type ProgressReportFn = fn(&mut ProgressState) -> bool;

/// Shared cancellation flag for a running load.
///
/// Clones share the same flag, so one clone can be handed to a worker thread
/// while another stays with the caller.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// State information for progress reporting.
pub struct ProgressState {
    /// Identifier for this progress state (e.g., "loading", "indexing")
    pub state_id: String,
    /// Total number of items to process
    pub total: u64,
    /// Current item being processed
    pub current: u64,
    /// Last item at which progress was reported
    pub last: u64,
    /// Number of items between progress reports
    pub report_interval: u64,
    /// Optional reporter function to call
    pub reporter: Option<ProgressReportFn>,
    cancel: Option<CancelFlag>,
    started: Instant,
    deadline: Option<Instant>,
}

impl ProgressState {
    /// Creates a new progress state.
    ///
    /// # Arguments
    ///
    /// * `state_id` - Identifier for this progress state
    /// * `total` - Total number of items to process
    /// * `report_interval_percent` - Percentage of items between reports (0-100)
    /// * `reporter` - Optional reporter function
    pub fn new(state_id: &str, total: u64, report_interval_percent: u64, reporter: Option<ProgressReportFn>) -> Self {
        Self {
            state_id: state_id.to_string(),
            total,
            current: 0,
            last: 0,
            report_interval: total.saturating_mul(report_interval_percent) / 100,
            reporter,
            cancel: None,
            started: Instant::now(),
            deadline: None,
        }
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Starts a nested stage with its own total, sharing cancellation and deadline.
    pub fn stage(&self, state_id: &str, total: u64, report_interval_percent: u64) -> Self {
        Self {
            state_id: state_id.to_string(),
            total,
            current: 0,
            last: 0,
            report_interval: total.saturating_mul(report_interval_percent) / 100,
            reporter: self.reporter,
            cancel: self.cancel.clone(),
            started: self.started,
            deadline: self.deadline,
        }
    }

    /// Reports progress for the current item.
    ///
    /// Returns `true` if the operation should be cancelled, `false` otherwise.
    pub fn report(&mut self, current: u64) -> bool {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return true;
        }
        let Some(reporter) = self.reporter else {
            return false;
        };
        let due = current.saturating_sub(self.last) > self.report_interval
            || current + 1 == self.total;
        if !due {
            return false;
        }
        self.current = current;
        let cancelled = reporter(self);
        self.last = current;
        if cancelled {
            if let Some(cancel) = &self.cancel {
                cancel.cancel();
            }
        }
        cancelled
    }

    /// Reports progress and converts cancellation or an expired deadline into an error.
    pub fn check(&mut self, current: u64) -> Result<()> {
        if self.report(current) {
            return Err(MovarError::user_interrupted());
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(MovarError::timeout(self.started.elapsed().as_secs_f64()));
            }
        }
        Ok(())
    }
}
