//! Journal entries.

use crate::error::{CoreError, CoreResult};
use chrono::{Local, NaiveDateTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Timestamp layout used in entry headers.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `[YYYY-MM-DD HH:MM:SS] - ` at the start of a line.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\] - ").expect("valid header pattern")
});

/// One timestamped free-text record.
///
/// The body may span several lines. Once appended to a segment an entry is
/// never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    timestamp: NaiveDateTime,
    body: String,
}

impl Entry {
    /// Creates an entry. Sub-second precision is dropped.
    #[must_use]
    pub fn new(timestamp: NaiveDateTime, body: impl Into<String>) -> Self {
        Self {
            timestamp: truncate_to_second(timestamp),
            body: body.into(),
        }
    }

    /// Creates an entry stamped with the current local time.
    #[must_use]
    pub fn now(body: impl Into<String>) -> Self {
        Self::new(Local::now().naive_local(), body)
    }

    /// Parses a header line of the form `[YYYY-MM-DD HH:MM:SS] - <rest>`.
    ///
    /// Everything after `"] - "` becomes the body, including a trailing line
    /// terminator if `line` carries one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Format`] if the line does not start with a
    /// well-formed header or the timestamp is not a real date and time.
    pub fn from_text(line: &str) -> CoreResult<Self> {
        let caps = HEADER
            .captures(line)
            .ok_or_else(|| CoreError::format(line, "expected `[YYYY-MM-DD HH:MM:SS] - `"))?;
        let stamp = &caps[1];
        let timestamp = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
            .map_err(|e| CoreError::format(line, format!("bad timestamp {stamp}: {e}")))?;
        let body_start = caps.get(0).map_or(0, |m| m.end());
        Ok(Self {
            timestamp,
            body: line[body_start..].to_string(),
        })
    }

    /// Renders the header form `[timestamp] - body`.
    ///
    /// Newlines inside the body are emitted as-is.
    #[must_use]
    pub fn to_text(&self) -> String {
        format!("[{}] - {}", self.timestamp.format(TIMESTAMP_FORMAT), self.body)
    }

    /// Appends raw text to the body without any normalization.
    pub fn append_text(&mut self, text: &str) {
        self.body.push_str(text);
    }

    /// Returns the entry's timestamp.
    #[must_use]
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the entry's body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the entry and returns its body.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }

    /// Removes one trailing `\n` from the body, if present.
    pub(crate) fn strip_line_terminator(&mut self) {
        if self.body.ends_with('\n') {
            self.body.pop();
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn truncate_to_second(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp.with_nanosecond(0).unwrap_or(timestamp)
}
