//! I/O utility functions for dictionary files and locations.
//!
//! This module provides helper functions for:
//! - Listing the dictionary files directly inside a location
//! - Reading a dictionary file through a read-only memory map
//! - Skipping a UTF-8 byte-order mark

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use walkdir::WalkDir;

use crate::{MovarError, Result};

/// Scan a directory for regular files with the given extension.
///
/// Only files directly inside `target_dir` are returned (no recursion),
/// sorted by file name so that repeated scans see the same order.
///
/// # Arguments
/// * `target_dir` - The directory to scan
/// * `suffix` - File extension without the leading dot, compared case-sensitively
///
/// # Errors
/// Returns a `DirectoryRead` error if the directory does not exist or cannot be listed.
pub fn scan_dir<P: AsRef<Path>>(target_dir: P, suffix: &str) -> Result<Vec<PathBuf>> {
    let target_dir = target_dir.as_ref();
    if !target_dir.is_dir() {
        return Err(MovarError::directory_read(target_dir, "not a directory"));
    }

    let walker = WalkDir::new(target_dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| MovarError::directory_read(target_dir, e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry.path()
            .extension()
            .is_some_and(|ext| ext.to_str() == Some(suffix));
        if matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Strips a leading UTF-8 byte-order mark, if present.
pub fn skip_utf8_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Maps `path` read-only and hands the decoded text to `f`.
///
/// The mapping lives only for the duration of the call and is released whether
/// `f` succeeds or fails. Empty files are passed as `""` without being mapped.
///
/// # Errors
/// Returns a `FileRead` error naming the file when it cannot be opened or mapped,
/// or when its content is not valid UTF-8. Errors returned by `f` are passed through.
pub fn with_mapped_text<P, T, F>(path: P, f: F) -> Result<T>
where
    P: AsRef<Path>,
    F: FnOnce(&str) -> Result<T>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MovarError::file_read(path, e))?;
    let len = file.metadata().map_err(|e| MovarError::file_read(path, e))?.len();
    if len == 0 {
        return f("");
    }

    // SAFETY: the file is opened read-only and the mapping is immutable; it is
    // dropped before this function returns.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| MovarError::file_read(path, e))?;
    let text = std::str::from_utf8(&mmap)
        .map_err(|e| MovarError::file_read(path, io::Error::new(io::ErrorKind::InvalidData, e)))?;
    f(skip_utf8_bom(text))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_scan_dir_filters_by_suffix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();
        fs::write(dir.path().join("upper.TXT"), "x").unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();
        fs::write(dir.path().join("nested.txt").join("c.txt"), "c").unwrap();

        let files = scan_dir(dir.path(), "txt").unwrap();
        let names: Vec<_> = files.iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_dir(dir.path().join("missing"), "txt").unwrap_err();
        assert!(matches!(err, MovarError::DirectoryRead { .. }));
    }

    #[test]
    fn test_mapped_text_skips_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        fs::write(&path, "\u{FEFF}#Title:x").unwrap();
        let text = with_mapped_text(&path, |text| Ok(text.to_string())).unwrap();
        assert_eq!(text, "#Title:x");
    }

    #[test]
    fn test_mapped_text_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, [b'#', 0xE9, 0xFF]).unwrap();
        let err = with_mapped_text(&path, |text| Ok(text.len())).unwrap_err();
        assert!(matches!(err, MovarError::FileRead { .. }));
        assert_eq!(err.filename(), Some("latin1.txt"));
    }

    #[test]
    fn test_mapped_text_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();
        assert_eq!(with_mapped_text(&path, |text| Ok(text.len())).unwrap(), 0);
    }
}
