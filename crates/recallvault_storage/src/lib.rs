//! # RecallVault Storage
//!
//! Segment directory backends for RecallVault.
//!
//! This crate provides the lowest-level storage abstraction for RecallVault.
//! Backends are **opaque file stores** - they do not interpret the text
//! they hold.
//!
//! ## Design Principles
//!
//! - Backends are a flat namespace of named files (list, read, append)
//! - No knowledge of entries, separators, or segment numbering
//! - Appends only; nothing is ever rewritten in place
//! - File handles never outlive a single call
//!
//! ## Available Backends
//!
//! - [`DirBackend`] - One project directory on disk
//! - [`InMemoryBackend`] - For testing and dry runs
//!
//! ## Example
//!
//! ```rust
//! use recallvault_storage::{InMemoryBackend, SegmentBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! backend.append("log_1.txt", b"hello world").unwrap();
//! let text = backend.read_to_string("log_1.txt").unwrap();
//! assert_eq!(text.as_deref(), Some("hello world"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod dir;
mod error;
mod memory;

pub use backend::{decode_text, validate_name, SegmentBackend};
pub use dir::DirBackend;
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryBackend;
