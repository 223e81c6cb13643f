//! Directory-backed storage for segment files.

use crate::backend::{decode_text, validate_name, SegmentBackend};
use crate::error::{StorageError, StorageResult};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A backend whose files are the regular files of one directory.
///
/// Every operation opens, uses, and closes its own file handle, so the
/// directory can be edited by hand between calls.
///
/// # Durability
///
/// `append` flushes the written bytes to the OS before returning. There is
/// no fsync; a crash may lose the tail of the last write.
///
/// # Example
///
/// ```no_run
/// use recallvault_storage::{DirBackend, SegmentBackend};
/// use std::path::Path;
///
/// let mut backend = DirBackend::open(Path::new("journal/work")).unwrap();
/// backend.append("log_1.txt", b"[2024-01-15 09:30:00] - hello\n").unwrap();
/// assert!(backend.exists("log_1.txt").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct DirBackend {
    root: PathBuf,
}

impl DirBackend {
    /// Opens a backend over an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DirectoryNotFound`] if `path` is missing or
    /// is not a directory.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if !path.is_dir() {
            return Err(StorageError::directory_not_found(path));
        }
        Ok(Self {
            root: path.to_path_buf(),
        })
    }

    /// Opens a backend, creating the directory and its parents if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open_with_create_dirs(path: &Path) -> StorageResult<Self> {
        fs::create_dir_all(path)?;
        Self::open(path)
    }

    /// Returns the backing directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, name: &str) -> StorageResult<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

impl SegmentBackend for DirBackend {
    fn list(&self) -> StorageResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Names that are not UTF-8 can never be segment names.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_to_string(&self, name: &str) -> StorageResult<Option<String>> {
        let path = self.file_path(name)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(decode_text(name, bytes)))
    }

    fn append(&mut self, name: &str, data: &[u8]) -> StorageResult<u64> {
        let path = self.file_path(name)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        let offset = file.metadata()?.len();
        if !data.is_empty() {
            file.write_all(data)?;
            file.flush()?;
        }
        Ok(offset)
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.file_path(name)?.is_file())
    }

    fn path_of(&self, name: &str) -> Option<PathBuf> {
        self.file_path(name).ok()
    }
}
