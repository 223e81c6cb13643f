//! Segmented log storage.
//!
//! A project's journal is split across numbered segment files
//! (`log_1.txt`, `log_2.txt`, ...). Each segment holds entries in the
//! plain-text format of [`crate::codec`]. New entries always go to the
//! segment with the highest number; once that segment holds `log_limit`
//! entries the next append starts a fresh one.
//!
//! ## Layout
//!
//! ```text
//! project/
//! ├── config.json
//! ├── log_1.txt      full, read-only
//! ├── log_2.txt      full, read-only
//! └── log_3.txt      active
//! ```
//!
//! There is no manifest: the directory listing is the index.

mod namer;
mod store;

pub use namer::{SegmentNamer, DEFAULT_EXTENSION, DEFAULT_PREFIX};
pub use store::{AppendOutcome, SegmentedLogStore};
