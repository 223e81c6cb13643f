//! Plain-text segment codec.
//!
//! Each entry is written as a header line, its continuation lines, and a
//! separator:
//!
//! ```text
//! [2024-01-15 09:30:00] - Finished the design doc.
//! on:project-x due:2024-01-20
//! --------------------
//! ```
//!
//! The separator closes every entry, including the last one in a file, so a
//! header without a closing separator marks a truncated write.
//!
//! ## Scanner
//!
//! Decoding is a two-state line scanner. Outside an entry, a header line
//! opens one and everything else is ignored, which keeps hand-edited files
//! readable. Inside an entry, lines are appended verbatim until the
//! separator. A body line that is itself a separator cannot be represented;
//! [`check_encodable`] rejects such entries before they are written.

use crate::batch::EntryBatch;
use crate::entry::Entry;
use crate::error::{CoreError, CoreResult};
use std::fmt;
use tracing::warn;

/// Line that terminates every entry.
pub const SEPARATOR: &str = "--------------------";

/// Result of scanning one entry out of a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEntry {
    /// A complete entry.
    Parsed(Entry),
    /// An entry that was dropped.
    Skipped(SkipReason),
}

/// Why the scanner dropped an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A header-like line failed to parse; its body lines were discarded.
    MalformedHeader {
        /// 1-based line number of the header.
        line: usize,
        /// Parser message.
        reason: String,
    },
    /// The input ended before the entry's separator.
    Truncated {
        /// 1-based line number of the entry's header.
        line: usize,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHeader { line, reason } => {
                write!(f, "line {line}: malformed header ({reason})")
            }
            Self::Truncated { line } => {
                write!(f, "line {line}: entry has no closing separator")
            }
        }
    }
}

/// Appends the on-disk form of one entry to `out`.
pub fn encode_entry(entry: &Entry, out: &mut String) {
    out.push_str(&entry.to_text());
    out.push('\n');
    out.push_str(SEPARATOR);
    out.push('\n');
}

/// Checks that an entry reads back unchanged after encoding.
///
/// # Errors
///
/// Returns [`CoreError::Format`] if a body line after the first would be
/// read as a separator.
pub fn check_encodable(entry: &Entry) -> CoreResult<()> {
    // The first body line shares the header line, so it can never close the entry.
    match entry.body().split('\n').skip(1).find(|line| is_separator(line)) {
        Some(line) => Err(CoreError::format(
            line,
            "body line would be read as an entry separator",
        )),
        None => Ok(()),
    }
}

/// Encodes entries in order.
pub fn encode<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    let mut out = String::new();
    for entry in entries {
        encode_entry(entry, &mut out);
    }
    out
}

/// Scans text into per-entry results, keeping skipped entries visible.
#[must_use]
pub fn scan(text: &str) -> Vec<ParsedEntry> {
    let mut results = Vec::new();
    let mut pending: Option<(usize, Entry)> = None;

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;

        if let Some((start, mut entry)) = pending.take() {
            if is_separator(line) {
                entry.strip_line_terminator();
                results.push(ParsedEntry::Parsed(entry));
            } else {
                entry.append_text(line);
                pending = Some((start, entry));
            }
            continue;
        }

        if is_separator(line) || !looks_like_header(line) {
            continue;
        }

        match Entry::from_text(line) {
            Ok(entry) => pending = Some((line_no, entry)),
            Err(e) => results.push(ParsedEntry::Skipped(SkipReason::MalformedHeader {
                line: line_no,
                reason: e.to_string(),
            })),
        }
    }

    if let Some((start, _)) = pending {
        results.push(ParsedEntry::Skipped(SkipReason::Truncated { line: start }));
    }

    results
}

/// Decodes text into a batch, dropping entries that cannot be recovered.
///
/// Each dropped entry is logged at `warn` level.
#[must_use]
pub fn decode(text: &str) -> EntryBatch {
    scan(text)
        .into_iter()
        .filter_map(|result| match result {
            ParsedEntry::Parsed(entry) => Some(entry),
            ParsedEntry::Skipped(reason) => {
                warn!(%reason, "skipping unreadable entry");
                None
            }
        })
        .collect()
}

fn is_separator(line: &str) -> bool {
    line.trim_end() == SEPARATOR
}

fn looks_like_header(line: &str) -> bool {
    line.starts_with('[') && line.contains("] - ")
}
