//! Todo items embedded in entry text.
//!
//! A todo is a line of the form
//!
//! ```text
//! [ ] 12: call the plumber due:2024-01-20 on:home
//! ```
//!
//! The `12: ` id, `due:` date and `on:` location are optional; `[x]` marks
//! the item as done.

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static TODO_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\[( |x)\] (?:(\d+): )?(.+)$").expect("valid todo pattern")
});

static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+on:").expect("valid location pattern"));

static DUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)due:(\d{4}-\d{2}-\d{2})(?:\s|$)").expect("valid due pattern")
});

static FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(?:due|on):").expect("valid field pattern"));

static FIELD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:due:\S+|on:\S+)").expect("valid field token pattern"));

/// A todo item parsed from text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    /// `[x]` rather than `[ ]`.
    pub completed: bool,
    /// Numeric id written as `N: ` after the box.
    pub id: Option<u64>,
    /// Text with `due:` and `on:` fields removed.
    pub description: String,
    /// Due date.
    pub due: Option<NaiveDate>,
    /// Free-form location after `on:`.
    pub location: Option<String>,
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.completed { "[x] " } else { "[ ] " })?;
        if let Some(id) = self.id {
            write!(f, "{id}: ")?;
        }
        f.write_str(&self.description)?;
        if let Some(due) = self.due {
            write!(f, " due:{}", due.format("%Y-%m-%d"))?;
        }
        if let Some(location) = &self.location {
            write!(f, " on:{location}")?;
        }
        Ok(())
    }
}

/// Extracts every todo line from `text`, in order.
#[must_use]
pub fn extract_todos(text: &str) -> Vec<Todo> {
    TODO_LINE
        .captures_iter(text)
        .map(|caps| {
            let rest = caps[3].trim_end_matches('\r');
            parse_todo(&caps[1] == "x", caps.get(2), rest)
        })
        .collect()
}

/// Returns the trimmed text preceding the first todo line.
#[must_use]
pub fn content_before_todos(text: &str) -> &str {
    let end = TODO_LINE.find(text).map_or(text.len(), |m| m.start());
    text[..end].trim()
}

fn parse_todo(completed: bool, id: Option<regex::Match<'_>>, rest: &str) -> Todo {
    let (before_location, location) = match LOCATION.find(rest) {
        Some(m) => {
            let location = rest[m.end()..].trim();
            (&rest[..m.start()], (!location.is_empty()).then(|| location.to_string()))
        }
        None => (rest, None),
    };

    let due = DUE
        .captures(before_location)
        .and_then(|caps| NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok());

    let description_end = FIELD.find(rest).map_or(rest.len(), |m| m.start());
    let description = FIELD_TOKEN
        .replace_all(&rest[..description_end], "")
        .trim()
        .to_string();

    Todo {
        completed,
        id: id.and_then(|m| m.as_str().parse().ok()),
        description,
        due,
        location,
    }
}
