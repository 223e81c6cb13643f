//! Error types for RecallVault core.

use recallvault_storage::StorageError;
use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in RecallVault core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error, including a missing project directory.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An entry header line does not match `[YYYY-MM-DD HH:MM:SS] - ...`.
    #[error("invalid entry header {line:?}: {reason}")]
    Format {
        /// The offending line, without its terminator.
        line: String,
        /// Why the line was rejected.
        reason: String,
    },

    /// A batch split asked for at least as many entries as the batch holds.
    #[error("cannot split {available} entries after {requested}: no entries would remain")]
    InsufficientEntries {
        /// Requested prefix length.
        requested: usize,
        /// Entries actually in the batch.
        available: usize,
    },

    /// Appending to a segment failed.
    #[error("failed to write segment {segment}: {source}")]
    SegmentWrite {
        /// The segment being written.
        segment: String,
        /// The underlying storage failure.
        #[source]
        source: StorageError,
    },

    /// A name does not follow the segment naming convention.
    #[error("invalid segment name: {name}")]
    InvalidSegmentName {
        /// The rejected name.
        name: String,
    },

    /// Operation not permitted in current state.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Description of why operation is invalid.
        message: String,
    },

    /// Configuration is missing or holds an invalid value.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },

    /// A configuration key that does not exist.
    #[error("unknown configuration key: {key}")]
    UnknownConfigKey {
        /// The key that was requested.
        key: String,
    },

    /// Project not found.
    #[error("project not found: {name}")]
    ProjectNotFound {
        /// Name of the project.
        name: String,
    },

    /// Project already exists.
    #[error("project already exists: {name}")]
    ProjectExists {
        /// Name of the project.
        name: String,
    },

    /// Project name cannot be used as a directory name.
    #[error("invalid project name {name:?}: {reason}")]
    InvalidProjectName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Template not found.
    #[error("template not found: {name}")]
    TemplateNotFound {
        /// Name of the template.
        name: String,
    },

    /// Template already exists.
    #[error("template already exists: {name}")]
    TemplateExists {
        /// Name of the template.
        name: String,
    },
}

impl CoreError {
    /// Creates a format error for a header line.
    pub fn format(line: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            line: line.trim_end_matches(['\r', '\n']).to_string(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid project name error.
    pub fn invalid_project_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error reports a missing project directory.
    #[must_use]
    pub fn is_directory_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::DirectoryNotFound { .. }))
    }
}
