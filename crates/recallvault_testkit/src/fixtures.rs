//! Test fixtures for vaults and projects.
//!
//! Provides temporary vaults that are removed when dropped, plus helpers for
//! building entries with predictable timestamps.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use recallvault_core::{Config, Entry, EntryBatch, ProjectRef, SegmentedLogStore, Vault};
use recallvault_storage::InMemoryBackend;
use std::path::Path;
use tempfile::TempDir;

/// A vault in a temporary directory.
pub struct TestVault {
    /// The vault instance.
    pub vault: Vault,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestVault {
    /// Creates an empty vault.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let vault = Vault::open(temp_dir.path().join("vault"), true).expect("Failed to open vault");
        Self {
            vault,
            _temp_dir: temp_dir,
        }
    }

    /// Returns the vault root.
    pub fn root(&self) -> &Path {
        self.vault.root()
    }

    /// Returns a configuration pointing at this vault.
    pub fn config(&self) -> Config {
        Config::new().with_path(self.root())
    }

    /// Returns the project, creating it if needed.
    pub fn project(&self, name: &str) -> ProjectRef {
        self.vault
            .resolve(name, None)
            .or_else(|_| match name.split_once('/') {
                Some((parent, child)) => self.vault.create(parent, Some(child)),
                None => self.vault.create(name, None),
            })
            .expect("Failed to create project")
    }

    /// Opens a project's log with the given capacity, creating the project if
    /// needed.
    pub fn project_log(&self, name: &str, log_limit: usize) -> SegmentedLogStore {
        SegmentedLogStore::open(self.project(name).path(), log_limit)
            .expect("Failed to open project log")
    }
}

impl Default for TestVault {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestVault {
    type Target = Vault;

    fn deref(&self) -> &Self::Target {
        &self.vault
    }
}

/// Runs a test with a temporary vault.
pub fn with_temp_vault<F, R>(f: F) -> R
where
    F: FnOnce(&TestVault) -> R,
{
    let vault = TestVault::new();
    f(&vault)
}

/// Creates an in-memory log store.
pub fn memory_log(log_limit: usize) -> SegmentedLogStore {
    SegmentedLogStore::with_backend(Box::new(InMemoryBackend::new()), log_limit)
}

/// Fixed starting point for fixture timestamps.
pub fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid fixture timestamp")
}

/// Entry `i` of a fixture sequence: one minute after entry `i - 1`.
pub fn sample_entry(i: usize) -> Entry {
    let timestamp = base_time() + Duration::minutes(i as i64);
    Entry::new(timestamp, format!("entry {i}"))
}

/// A batch of `count` sequential fixture entries.
pub fn sample_batch(count: usize) -> EntryBatch {
    (0..count).map(sample_entry).collect()
}

/// A batch holding one entry with the given body.
pub fn single(body: &str) -> EntryBatch {
    EntryBatch::from(vec![Entry::new(base_time(), body)])
}
