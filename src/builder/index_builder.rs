//! Headword index construction.
//!
//! The index of a dictionary is derived from its body and its `#Regex filter`
//! pattern. Every non-overlapping match, scanned left to right, is a headword
//! occurrence; the lower-cased match text is the key. The first occurrence fixes
//! the key's position and start, later occurrences move the end of its span.
//!
//! Patterns are compiled with the `regex` crate in multi-line mode (`^` and `$`
//! match at line boundaries, also before `\r\n`; `.` does not match `\n`).
//! Matching runs in linear time, so a user-authored pattern cannot stall a load
//! through backtracking.
//!
//! # Examples
//!
//! ```
//! use movar::builder::index_builder::{build_index, compile_entry_pattern};
//! use movar::storage::Span;
//! use movar::utils::ProgressState;
//!
//! # fn main() -> movar::Result<()> {
//! let regex = compile_entry_pattern("Demo", "alpha", 1 << 20)?;
//! let mut progress = ProgressState::new("indexing", 0, 10, None);
//! let index = build_index("alpha one alpha two", &regex, &mut progress)?;
//! assert_eq!(index.get("alpha"), Some(Span::new(0, 15)));
//! # Ok(())
//! # }
//! ```

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::builder::loader_config::LoaderConfig;
use crate::storage::record::{DictionaryRecord, EntryIndex, Span};
use crate::utils::progress_report::ProgressState;
use crate::{MovarError, Result};

/// Number of matches between cancellation checks during a scan.
const CHECK_EVERY_MATCHES: usize = 1024;
/// Body bytes scanned between cancellation checks, for sparse matches.
const CHECK_EVERY_BYTES: usize = 64 * 1024;

/// Compiles a dictionary's entry pattern.
///
/// # Errors
///
/// Returns a `RegexCompilation` error naming `title` and the pattern if it is
/// invalid or its compiled form exceeds `size_limit` bytes.
pub fn compile_entry_pattern(title: &str, pattern: &str, size_limit: usize) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .crlf(true)
        .size_limit(size_limit)
        .build()
        .map_err(|e| MovarError::regex_compilation(title, pattern, e))
}

/// Scans `body` with `regex` and builds its headword index.
///
/// Empty matches are skipped. `progress` is checked every
/// `CHECK_EVERY_MATCHES` matches, whenever the scan has moved
/// `CHECK_EVERY_BYTES` past the last check, and once at the end of the body.
/// The scan stops with an error when it reports cancellation or an expired
/// deadline.
pub fn build_index(body: &str, regex: &Regex, progress: &mut ProgressState) -> Result<EntryIndex> {
    let mut index = EntryIndex::new();
    let mut skipped_empty = 0usize;
    let mut last_check = 0usize;
    for (n, m) in regex.find_iter(body).enumerate() {
        if n % CHECK_EVERY_MATCHES == 0 || m.start() - last_check >= CHECK_EVERY_BYTES {
            progress.check(m.start() as u64)?;
            last_check = m.start();
        }
        if m.is_empty() {
            skipped_empty += 1;
            continue;
        }
        index.record(m.as_str().to_lowercase(), Span::from(m.range()));
    }
    progress.check(body.len() as u64)?;
    if skipped_empty > 0 {
        debug!("Skipped {} empty matches of {:?}", skipped_empty, regex.as_str());
    }
    Ok(index)
}

/// Builds and stores the index of `record` from its own entry pattern.
pub fn index_record(record: &mut DictionaryRecord, config: &LoaderConfig, progress: &ProgressState) -> Result<()> {
    let regex = compile_entry_pattern(record.title(), record.entry_pattern(), config.regex_size_limit)?;
    let mut progress = progress.stage(
        &format!("indexing {}", record.title()),
        record.body().len() as u64,
        config.progress_interval_percent,
    );
    let index = build_index(record.body(), &regex, &mut progress)?;
    debug!("Indexed {} headwords in {:?}", index.len(), record.title());
    record.set_index(index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::storage::header::DictionaryHeader;
    use crate::utils::progress_report::CancelFlag;

    fn index_of(body: &str, pattern: &str) -> EntryIndex {
        let regex = compile_entry_pattern("test", pattern, 1 << 20).unwrap();
        let mut progress = ProgressState::new("test", body.len() as u64, 10, None);
        build_index(body, &regex, &mut progress).unwrap()
    }

    #[test]
    fn test_repeated_key_extends_span() {
        let body = "alpha one alpha two";
        let index = index_of(body, "alpha");
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("alpha"), Some(Span::new(0, 15)));
        assert_eq!(&body[10..15], "alpha");
    }

    #[test]
    fn test_keys_lowercased_in_first_occurrence_order() {
        let body = "Beta\nb text\nAlpha\na text\nBETA\nmore\nGamma\ng\n";
        let index = index_of(body, "^[A-Za-z]+$");
        let keys: Vec<_> = index.keys().collect();
        assert_eq!(keys, vec!["beta", "alpha", "more", "gamma", "g"]);

        let index = index_of(body, "^[A-Z][A-Za-z]+$");
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["beta", "alpha", "gamma"]);
        let beta = index.get("beta").unwrap();
        assert_eq!(beta.start, 0);
        assert_eq!(&body[beta.end - 4..beta.end], "BETA");
    }

    #[test]
    fn test_multiline_anchors_and_dot() {
        let body = "cat\n  a small animal\ndog\n  barks\n";
        let index = index_of(body, "^\\S.*$");
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["cat", "dog"]);
    }

    #[test]
    fn test_index_is_deterministic() {
        let body = "one\nx\ntwo\ny\none\nz\nthree\n";
        assert_eq!(index_of(body, "^[a-z]{3,}$"), index_of(body, "^[a-z]{3,}$"));
    }

    #[test]
    fn test_empty_matches_skipped() {
        let index = index_of("ab", "x*");
        assert!(index.is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = compile_entry_pattern("Broken", "([a-z", 1 << 20).unwrap_err();
        match err {
            MovarError::RegexCompilation { title, pattern, .. } => {
                assert_eq!(title, "Broken");
                assert_eq!(pattern, "([a-z");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_size_limit() {
        let err = compile_entry_pattern("Huge", r"\w{1000}\w{1000}", 1024).unwrap_err();
        assert!(matches!(err, MovarError::RegexCompilation { .. }));
    }

    #[test]
    fn test_cancelled_scan() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let regex = compile_entry_pattern("test", "a", 1 << 20).unwrap();
        let mut progress = ProgressState::new("test", 3, 10, None).with_cancel_flag(cancel);
        let err = build_index("aaa", &regex, &mut progress).unwrap_err();
        assert!(err.is_user_interrupted());
    }

    #[test]
    fn test_cancelled_scan_without_matches() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let regex = compile_entry_pattern("test", "^[A-Z]+$", 1 << 20).unwrap();
        let mut progress = ProgressState::new("test", 9, 10, None).with_cancel_flag(cancel);
        let err = build_index("lowercase", &regex, &mut progress).unwrap_err();
        assert!(err.is_user_interrupted());
    }

    static CHECKED_OFFSETS: Mutex<Vec<u64>> = Mutex::new(Vec::new());

    fn record_offset(state: &mut ProgressState) -> bool {
        CHECKED_OFFSETS.lock().unwrap().push(state.current);
        false
    }

    #[test]
    fn test_sparse_matches_checked_by_distance() {
        let body = format!("A\n{}\nB\n", "x".repeat(CHECK_EVERY_BYTES + 10));
        let b_start = body.find("\nB").unwrap() as u64 + 1;
        let regex = compile_entry_pattern("test", "^[A-Z]$", 1 << 20).unwrap();
        let mut progress = ProgressState::new("test", body.len() as u64, 0, Some(record_offset));

        let index = build_index(&body, &regex, &mut progress).unwrap();
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        // second match is not a multiple of the match interval
        let offsets = CHECKED_OFFSETS.lock().unwrap().clone();
        assert_eq!(offsets, vec![b_start, body.len() as u64]);
    }

    #[test]
    fn test_index_record() {
        let header = DictionaryHeader {
            title: "Demo".to_string(),
            language_pair: "Eng-Eng".to_string(),
            description: String::new(),
            entry_pattern: "^[A-Z]+$".to_string(),
        };
        let mut record = DictionaryRecord::new(header, "CAT\nfeline\nDOG\ncanine\n".to_string());
        let progress = ProgressState::new("load", 1, 10, None);
        index_record(&mut record, &LoaderConfig::default(), &progress).unwrap();
        assert_eq!(record.article("cat"), Some("CAT\nfeline\n"));
        assert_eq!(record.article("Dog"), Some("DOG\ncanine\n"));
    }
}
