//! Benchmark utilities.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::distributions::Alphanumeric;
use rand::Rng;
use recallvault_core::{Entry, EntryBatch};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Generate a random body of roughly `size` bytes split into short lines.
pub fn random_body(size: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut body = String::with_capacity(size + size / 60);
    for i in 0..size {
        if i > 0 && i % 60 == 0 {
            body.push('\n');
        } else {
            body.push(char::from(rng.sample(Alphanumeric)));
        }
    }
    body
}

/// Generate `count` entries one minute apart with bodies of `body_size` bytes.
pub fn generate_entries(count: usize, body_size: usize) -> EntryBatch {
    (0..count)
        .map(|i| Entry::new(start() + Duration::minutes(i as i64), random_body(body_size)))
        .collect()
}
