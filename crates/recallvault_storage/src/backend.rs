//! Segment backend trait definition.

use crate::error::{StorageError, StorageResult};
use std::path::PathBuf;
use tracing::warn;

/// A flat namespace of append-only text files.
///
/// Backends are **opaque file stores**. They list, read, and append named
/// files; they know nothing about entries, separators, or segment numbering.
/// RecallVault owns all interpretation of file contents and names.
///
/// # Invariants
///
/// - `append` never rewrites existing bytes; it returns the size of the file
///   before the write, which is where the new data starts
/// - `read_to_string` returns `None` for a file that does not exist
/// - No file handle outlives the call that opened it
/// - Backends must be `Send + Sync`
///
/// # Implementors
///
/// - [`super::DirBackend`] - One directory on disk
/// - [`super::InMemoryBackend`] - For testing
pub trait SegmentBackend: Send + Sync {
    /// Lists the names of all files, sorted bytewise.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be read.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Reads a whole file as text.
    ///
    /// Returns `Ok(None)` if the file does not exist. Invalid UTF-8
    /// sequences are replaced with U+FFFD (see [`decode_text`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or an I/O error occurs.
    fn read_to_string(&self, name: &str) -> StorageResult<Option<String>>;

    /// Appends data to the end of a file, creating it if missing.
    ///
    /// Returns the offset where the data was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or an I/O error occurs.
    fn append(&mut self, name: &str, data: &[u8]) -> StorageResult<u64>;

    /// Returns whether a file with this name exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or an I/O error occurs.
    fn exists(&self, name: &str) -> StorageResult<bool>;

    /// Returns the on-disk location of a file, if the backend has one.
    fn path_of(&self, _name: &str) -> Option<PathBuf> {
        None
    }
}

/// Checks that a file name stays inside the backend's namespace.
///
/// Rejects empty names, `.` and `..`, and anything containing a path
/// separator or a NUL byte.
///
/// # Errors
///
/// Returns [`StorageError::InvalidName`] for a rejected name.
pub fn validate_name(name: &str) -> StorageResult<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(StorageError::invalid_name(name));
    }
    Ok(())
}

/// Decodes file contents as UTF-8, replacing invalid sequences.
///
/// A stray byte from a hand edit only damages the text around it, so the
/// rest of the file still reads.
pub fn decode_text(name: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let at = e.utf8_error().valid_up_to();
            warn!(file = name, offset = at, "invalid UTF-8, replacing damaged bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
