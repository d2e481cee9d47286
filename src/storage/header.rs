//! Dictionary file header parsing.
//!
//! A dictionary file starts with exactly four header lines, each of the form
//! `#FieldName:FieldValue` with a single `:` separator:
//!
//! ```text
//! #Title:English explanatory
//! #Pair:Eng-Eng
//! #Description:Sample dictionary
//! #Regex filter:^[A-Z]+$
//! ```
//!
//! Everything after the fourth line is the dictionary body.
//!
//! # Examples
//!
//! ```
//! use movar::storage::header::DictionaryHeader;
//!
//! let text = "#Title:Demo\n#Pair:Eng-Ukr\n#Description:Tiny\n#Regex filter:^\\w+\ncat\nкіт\n";
//! let (header, body) = DictionaryHeader::parse(text, "demo.txt")?;
//! assert_eq!(header.title, "Demo");
//! assert_eq!(header.entry_pattern, "^\\w+");
//! assert_eq!(body, "cat\nкіт\n");
//! # Ok::<(), movar::MovarError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::{MovarError, Result};

/// Number of header lines preceding the dictionary body.
pub const HEADER_LINE_COUNT: usize = 4;

/// Separator between a header field name and its value.
pub const FIELD_SEPARATOR: char = ':';

pub const TITLE_FIELD: &str = "#Title";
pub const PAIR_FIELD: &str = "#Pair";
pub const DESCRIPTION_FIELD: &str = "#Description";
pub const REGEX_FILTER_FIELD: &str = "#Regex filter";

/// Metadata read from the four header lines of a dictionary file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryHeader {
    /// Dictionary title, unique within a loaded collection
    pub title: String,
    /// Free-form language pair, e.g. "Eng-Eng"
    pub language_pair: String,
    /// Free-form description
    pub description: String,
    /// Regular expression matching every headword in the body
    pub entry_pattern: String,
}

impl DictionaryHeader {
    /// Splits `text` into its header and body.
    ///
    /// Header lines are trimmed of surrounding whitespace (so `\r\n` endings work)
    /// and must each contain exactly one `:`. The four field names may come in any
    /// order but each must appear once.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedHeader` error naming `filename` if a line is missing,
    /// has zero or several separators, or carries an unknown or repeated field name.
    pub fn parse<'a>(text: &'a str, filename: &str) -> Result<(Self, &'a str)> {
        let mut title = None;
        let mut language_pair = None;
        let mut description = None;
        let mut entry_pattern = None;

        let mut rest = text;
        for line_no in 1..=HEADER_LINE_COUNT {
            if rest.is_empty() {
                return Err(MovarError::malformed_header(
                    filename,
                    format!("expected {} header lines, found {}", HEADER_LINE_COUNT, line_no - 1),
                ));
            }
            let (line, remainder) = match rest.find('\n') {
                Some(pos) => (&rest[..pos], &rest[pos + 1..]),
                None => (rest, ""),
            };
            rest = remainder;

            let (name, value) = split_field(line.trim(), filename, line_no)?;
            let slot = match name {
                TITLE_FIELD => &mut title,
                PAIR_FIELD => &mut language_pair,
                DESCRIPTION_FIELD => &mut description,
                REGEX_FILTER_FIELD => &mut entry_pattern,
                _ => {
                    return Err(MovarError::malformed_header(
                        filename,
                        format!("line {} has unknown field {:?}", line_no, name),
                    ));
                }
            };
            if slot.replace(value.to_string()).is_some() {
                return Err(MovarError::malformed_header(
                    filename,
                    format!("line {} repeats field {:?}", line_no, name),
                ));
            }
        }

        // four distinct known names fill every slot
        match (title, language_pair, description, entry_pattern) {
            (Some(title), Some(language_pair), Some(description), Some(entry_pattern)) => Ok((
                Self { title, language_pair, description, entry_pattern },
                rest,
            )),
            _ => Err(MovarError::malformed_header(filename, "incomplete header")),
        }
    }

    /// Display label used by group settings, e.g. `"Oxford(Eng-Eng)"`.
    pub fn label(&self) -> String {
        format!("{}({})", self.title, self.language_pair)
    }
}

fn split_field<'a>(line: &'a str, filename: &str, line_no: usize) -> Result<(&'a str, &'a str)> {
    let separators = line.matches(FIELD_SEPARATOR).count();
    if separators != 1 {
        return Err(MovarError::malformed_header(
            filename,
            format!("line {} has {} '{}' separators, expected exactly one", line_no, separators, FIELD_SEPARATOR),
        ));
    }
    line.split_once(FIELD_SEPARATOR)
        .ok_or_else(|| MovarError::malformed_header(filename, format!("line {} has no separator", line_no)))
}
