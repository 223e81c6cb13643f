//! Entry templates.
//!
//! A template is a plain text file whose content pre-fills the editor when a
//! new entry is composed.

use crate::error::{CoreError, CoreResult};
use recallvault_storage::validate_name;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A directory of named templates.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Opens the template directory, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> CoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Returns the template directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path a template lives at.
    ///
    /// # Errors
    ///
    /// Returns a storage error if `name` is not a plain file name.
    pub fn path(&self, name: &str) -> CoreResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(name))
    }

    /// Returns true if the template exists.
    ///
    /// # Errors
    ///
    /// Returns a storage error if `name` is not a plain file name.
    pub fn exists(&self, name: &str) -> CoreResult<bool> {
        Ok(self.path(name)?.is_file())
    }

    /// Creates a template.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TemplateExists`] if the name is taken.
    pub fn create(&self, name: &str, content: &str) -> CoreResult<PathBuf> {
        let path = self.path(name)?;
        let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(CoreError::TemplateExists {
                    name: name.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(content.as_bytes())?;
        Ok(path)
    }

    /// Reads a template's content.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TemplateNotFound`] if it does not exist.
    pub fn read(&self, name: &str) -> CoreResult<String> {
        match fs::read_to_string(self.path(name)?) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CoreError::TemplateNotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a template.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TemplateNotFound`] if it does not exist.
    pub fn delete(&self, name: &str) -> CoreResult<()> {
        match fs::remove_file(self.path(name)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CoreError::TemplateNotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists template names, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn list(&self) -> CoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}
