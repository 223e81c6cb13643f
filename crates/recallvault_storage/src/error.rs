//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing directory does not exist or is not a directory.
    #[error("directory not found: {}", path.display())]
    DirectoryNotFound {
        /// The path that was expected to be a directory.
        path: PathBuf,
    },

    /// A file name is empty or would escape the backing directory.
    #[error("invalid file name: {name:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

impl StorageError {
    /// Creates a directory-not-found error.
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    /// Creates an invalid-name error.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }
}
