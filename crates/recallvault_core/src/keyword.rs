//! `key:value` keywords in entry text.
//!
//! Keywords such as `on:project-x` or `with:alice` tag an entry so it can be
//! found later.

use regex::Regex;
use serde::Serialize;
use std::ops::Range;
use std::sync::LazyLock;

static KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\w+):(\S+)").expect("valid keyword pattern"));

/// A keyword found in text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    /// Text before the colon.
    pub key: String,
    /// Text after the colon, up to the next whitespace.
    pub value: String,
    /// Byte range of the whole `key:value` token.
    pub span: Range<usize>,
}

impl Keyword {
    /// Returns true if `tag` names this keyword.
    ///
    /// `tag` is either a bare key (`on`) or a full `key:value` pair.
    #[must_use]
    pub fn matches(&self, tag: &str) -> bool {
        match tag.split_once(':') {
            Some((key, value)) => self.key == key && self.value == value,
            None => self.key == tag,
        }
    }
}

/// Finds every keyword in `text`, in order.
#[must_use]
pub fn keywords(text: &str) -> Vec<Keyword> {
    KEYWORD
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Keyword {
                key: caps[1].to_string(),
                value: caps[2].to_string(),
                span: whole.range(),
            })
        })
        .collect()
}

/// Returns true if any keyword in `text` matches `tag`.
#[must_use]
pub fn has_keyword(text: &str, tag: &str) -> bool {
    keywords(text).iter().any(|k| k.matches(tag))
}
