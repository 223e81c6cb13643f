//! # RecallVault Core
//!
//! Journal engine for RecallVault.
//!
//! This crate provides:
//! - [`Entry`] and [`EntryBatch`], the timestamped records of a journal
//! - The plain-text [`codec`] that reads and writes segment files
//! - [`SegmentNamer`] and [`SegmentedLogStore`] for capacity-bounded,
//!   append-only segment files
//! - Vault and project directories, per-project configuration, templates
//! - Todo and keyword extraction from entry text
//!
//! ## Example
//!
//! ```rust
//! use recallvault_core::{Entry, EntryBatch, SegmentedLogStore};
//! use recallvault_storage::InMemoryBackend;
//!
//! let mut log = SegmentedLogStore::with_backend(Box::new(InMemoryBackend::new()), 2);
//! for body in ["A", "B", "C"] {
//!     log.append(&EntryBatch::from(vec![Entry::now(body)])).unwrap();
//! }
//! assert_eq!(log.segments().unwrap(), vec!["log_1.txt", "log_2.txt"]);
//! assert_eq!(log.read(Some("log_2.txt")).unwrap().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod batch;
pub mod codec;
mod config;
mod entry;
mod error;
pub mod keyword;
mod segment;
mod template;
pub mod todo;
mod vault;

pub use batch::EntryBatch;
pub use codec::{ParsedEntry, SkipReason, SEPARATOR};
pub use config::{
    default_config_path, expand_home, Config, ProjectConfig, CONFIG_ENV, CONFIG_KEYS,
    DEFAULT_EDITOR, DEFAULT_LOG_LIMIT, DEFAULT_TEMPLATE_DIR,
};
pub use entry::{Entry, TIMESTAMP_FORMAT};
pub use error::{CoreError, CoreResult};
pub use keyword::Keyword;
pub use segment::{
    AppendOutcome, SegmentNamer, SegmentedLogStore, DEFAULT_EXTENSION, DEFAULT_PREFIX,
};
pub use template::TemplateStore;
pub use todo::Todo;
pub use vault::{ProjectNode, ProjectRef, Vault, PROJECT_CONFIG_FILE};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
