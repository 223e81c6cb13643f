//! Property-based test generators using proptest.
//!
//! Provides strategies for generating entries whose bodies survive the
//! segment text format.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use recallvault_core::{Entry, EntryBatch, SEPARATOR};

/// Strategy for second-precision timestamps between 1970 and 2099.
pub fn timestamp_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (1970i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(year, month, day, hour, minute, second)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|d| d.and_hms_opt(hour, minute, second))
                .expect("components are in range")
        },
    )
}

/// Strategy for one body line. May contain brackets, colons and dashes.
pub fn line_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[a-zA-Z0-9 \t:\[\]\-_.,!?]{0,40}").expect("Invalid regex")
}

/// Strategy for entry bodies that round-trip through the text format.
///
/// Lines are joined with `\n`. A line that reads as a separator is never
/// produced.
pub fn body_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 1..5)
        .prop_map(|lines| lines.join("\n"))
        .prop_filter("no separator lines", |body| {
            body.split('\n').all(|line| line.trim_end() != SEPARATOR)
        })
}

/// Strategy for a single entry.
pub fn entry_strategy() -> impl Strategy<Value = Entry> {
    (timestamp_strategy(), body_strategy()).prop_map(|(ts, body)| Entry::new(ts, body))
}

/// Strategy for a batch of `min..max` entries.
pub fn batch_strategy(min: usize, max: usize) -> impl Strategy<Value = EntryBatch> {
    prop::collection::vec(entry_strategy(), min..max).prop_map(EntryBatch::from)
}

/// Strategy for a sequence of non-empty batches, as a writer would append them.
pub fn append_sequence_strategy(
    max_batches: usize,
    max_batch_len: usize,
) -> impl Strategy<Value = Vec<EntryBatch>> {
    prop::collection::vec(batch_strategy(1, max_batch_len + 1), 1..max_batches + 1)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn timestamps_have_no_subseconds(ts in timestamp_strategy()) {
            prop_assert_eq!(ts.nanosecond(), 0);
        }

        #[test]
        fn bodies_have_no_separator_lines(body in body_strategy()) {
            prop_assert!(body.lines().all(|l| l.trim_end() != SEPARATOR));
        }

        #[test]
        fn batches_respect_bounds(batch in batch_strategy(2, 5)) {
            prop_assert!((2..5).contains(&batch.len()));
        }
    }
}
