// Utility functions and helpers
//
// This module provides general-purpose helpers: file scanning and mapped reads,
// headword folding for completion, and progress reporting with cancellation.

pub mod io_utils;
pub mod sort_key;
pub mod progress_report;

pub use io_utils::{scan_dir, skip_utf8_bom, with_mapped_text};
pub use sort_key::{get_sort_key, completes};
pub use progress_report::{CancelFlag, ProgressState, ProgressReportFn};
