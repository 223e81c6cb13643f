//! # RecallVault Testkit
//!
//! Test utilities for RecallVault.
//!
//! This crate provides:
//! - Temporary vault and project fixtures
//! - Property-based test generators using proptest
//! - Reference segment texts with their expected decoding
//!
//! ## Usage
//!
//! ```rust
//! use recallvault_testkit::prelude::*;
//!
//! let vault = TestVault::new();
//! let mut log = vault.project_log("work", 2);
//! log.append(&sample_batch(3)).unwrap();
//! assert_eq!(log.segments().unwrap(), vec!["log_1.txt"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
