//! In-memory segment backend for testing.

use crate::backend::{decode_text, validate_name, SegmentBackend};
use crate::error::StorageResult;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-memory segment backend.
///
/// This backend keeps every file in a map and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Dry runs that must not touch the disk
///
/// # Example
///
/// ```rust
/// use recallvault_storage::{InMemoryBackend, SegmentBackend};
///
/// let mut backend = InMemoryBackend::new();
/// let offset = backend.append("log_1.txt", b"test data").unwrap();
/// assert_eq!(offset, 0);
/// assert_eq!(backend.list().unwrap(), vec!["log_1.txt"]);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with pre-existing files.
    ///
    /// Useful for testing hand-edited or truncated segments.
    #[must_use]
    pub fn with_files<I, N, D>(files: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<Vec<u8>>,
    {
        let files = files
            .into_iter()
            .map(|(name, data)| (name.into(), data.into()))
            .collect();
        Self {
            files: RwLock::new(files),
        }
    }

    /// Returns a copy of one file's bytes.
    #[must_use]
    pub fn data(&self, name: &str) -> Option<Vec<u8>> {
        self.files.read().get(name).cloned()
    }

    /// Removes every file.
    pub fn clear(&mut self) {
        self.files.write().clear();
    }
}

impl SegmentBackend for InMemoryBackend {
    fn list(&self) -> StorageResult<Vec<String>> {
        Ok(self.files.read().keys().cloned().collect())
    }

    fn read_to_string(&self, name: &str) -> StorageResult<Option<String>> {
        validate_name(name)?;
        let files = self.files.read();
        let Some(bytes) = files.get(name) else {
            return Ok(None);
        };
        Ok(Some(decode_text(name, bytes.clone())))
    }

    fn append(&mut self, name: &str, data: &[u8]) -> StorageResult<u64> {
        validate_name(name)?;
        let mut files = self.files.write();
        let file = files.entry(name.to_string()).or_default();
        let offset = file.len() as u64;
        file.extend_from_slice(data);
        Ok(offset)
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        validate_name(name)?;
        Ok(self.files.read().contains_key(name))
    }
}
