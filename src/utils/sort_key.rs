//! Key folding for headword completion.
//!
//! Index keys are already lower-cased. For completion and ordering, punctuation
//! and other non-word characters are removed as well, so that `"-able"` sorts and
//! completes like `"able"`.
//!
//! # Examples
//!
//! ```
//! use movar::utils::sort_key::get_sort_key;
//!
//! assert_eq!(get_sort_key("[re-do]"), "redo");
//! ```

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\W").expect("static pattern")
});

/// Removes every non-word character (anything but letters, digits and `_`).
pub fn get_sort_key(key: &str) -> Cow<'_, str> {
    NON_WORD.replace_all(key, "")
}

/// Checks whether `key` completes `prefix`, either as typed or after folding.
///
/// Both sides are compared case-insensitively.
pub fn completes(key: &str, prefix: &str) -> bool {
    let key = key.to_lowercase();
    let prefix = prefix.to_lowercase();
    key.starts_with(&prefix) || get_sort_key(&key).starts_with(&prefix)
}
