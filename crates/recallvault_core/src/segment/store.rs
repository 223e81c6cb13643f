//! Capacity-aware segment store.

use crate::batch::EntryBatch;
use crate::codec::{self, ParsedEntry, SkipReason};
use crate::entry::Entry;
use crate::error::{CoreError, CoreResult};
use crate::segment::namer::SegmentNamer;
use recallvault_storage::{DirBackend, SegmentBackend};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of a successful [`SegmentedLogStore::append`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Segment the batch was written to.
    pub segment: String,
    /// Whether the write started a new segment because the previous one was
    /// full or ended inside an entry.
    pub rotated: bool,
    /// Number of entries written.
    pub written: usize,
}

/// Reads and appends entries across a project's segment files.
///
/// The store owns a backend (usually one project directory) and a capacity.
/// It caches the name of the active segment after the first scan; the cache
/// belongs to this instance only and is never shared.
pub struct SegmentedLogStore {
    backend: Box<dyn SegmentBackend>,
    namer: SegmentNamer,
    log_limit: usize,
    current: Option<String>,
}

impl SegmentedLogStore {
    /// Opens the store on an existing project directory.
    ///
    /// # Errors
    ///
    /// Returns a storage error wrapping `DirectoryNotFound` if `dir` is not
    /// an existing directory.
    pub fn open(dir: impl AsRef<Path>, log_limit: usize) -> CoreResult<Self> {
        let backend = DirBackend::open(dir.as_ref())?;
        Ok(Self::with_backend(Box::new(backend), log_limit))
    }

    /// Creates a store over any backend.
    #[must_use]
    pub fn with_backend(backend: Box<dyn SegmentBackend>, log_limit: usize) -> Self {
        Self {
            backend,
            namer: SegmentNamer::default(),
            log_limit,
            current: None,
        }
    }

    /// Replaces the segment naming convention.
    #[must_use]
    pub fn with_namer(mut self, namer: SegmentNamer) -> Self {
        self.namer = namer;
        self.current = None;
        self
    }

    /// Returns the capacity that triggers rotation.
    #[must_use]
    pub fn log_limit(&self) -> usize {
        self.log_limit
    }

    /// Returns the cached active segment, if one has been resolved.
    #[must_use]
    pub fn current_segment(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Returns the naming convention in use.
    #[must_use]
    pub fn namer(&self) -> &SegmentNamer {
        &self.namer
    }

    /// Reads every entry in one segment.
    ///
    /// `None` or a segment that does not exist yields an empty batch.
    /// Malformed or truncated entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment exists but cannot be read.
    pub fn read(&self, segment: Option<&str>) -> CoreResult<EntryBatch> {
        let Some(name) = segment else {
            return Ok(EntryBatch::new());
        };
        Ok(match self.backend.read_to_string(name)? {
            Some(text) => codec::decode(&text),
            None => EntryBatch::new(),
        })
    }

    /// Scans one segment, reporting skipped entries instead of dropping them.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment exists but cannot be read.
    pub fn scan(&self, segment: &str) -> CoreResult<Vec<ParsedEntry>> {
        Ok(self
            .backend
            .read_to_string(segment)?
            .map(|text| codec::scan(&text))
            .unwrap_or_default())
    }

    /// Lists every segment, lowest number first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be listed.
    pub fn segments(&self) -> CoreResult<Vec<String>> {
        self.namer.segments(self.backend.as_ref())
    }

    /// Rescans the backend for the latest segment and refreshes the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be listed.
    pub fn latest_segment(&mut self) -> CoreResult<Option<String>> {
        let latest = self.namer.latest(self.backend.as_ref())?;
        self.current.clone_from(&latest);
        Ok(latest)
    }

    /// Returns the most recent entry of the latest segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be listed or read.
    pub fn latest_entry(&mut self) -> CoreResult<Option<Entry>> {
        let latest = self.latest_segment()?;
        let batch = self.read(latest.as_deref())?;
        Ok(batch.into_entries().pop())
    }

    /// Reads every segment in order into one batch.
    ///
    /// # Errors
    ///
    /// Returns an error if any segment cannot be read.
    pub fn read_all(&self) -> CoreResult<EntryBatch> {
        let mut all = EntryBatch::new();
        for segment in self.segments()? {
            all.extend(self.read(Some(&segment))?);
        }
        Ok(all)
    }

    /// Returns the on-disk path of a segment, if the backend has one.
    #[must_use]
    pub fn segment_path(&self, segment: &str) -> Option<PathBuf> {
        self.backend.path_of(segment)
    }

    /// Appends a batch to the active segment, rotating first if it is full.
    ///
    /// Capacity is checked once per call against the entries already in the
    /// active segment. The batch is never split across segments, so a
    /// segment can end up holding more than `log_limit` entries.
    ///
    /// A segment whose last entry has no closing separator is treated as
    /// full: the batch goes to the next segment and the dangling tail is
    /// left untouched. If the active segment ends without a line break, one
    /// is written before the batch.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidOperation`] for an empty batch,
    /// [`CoreError::Format`] if an entry body contains a separator line, and
    /// [`CoreError::SegmentWrite`] if the bytes cannot be written.
    pub fn append(&mut self, batch: &EntryBatch) -> CoreResult<AppendOutcome> {
        if batch.is_empty() {
            return Err(CoreError::invalid_operation("cannot append an empty batch"));
        }
        for entry in batch {
            codec::check_encodable(entry)?;
        }

        let active = match self.current.clone() {
            Some(name) => Some(name),
            None => self.namer.latest(self.backend.as_ref())?,
        };

        let mut text = String::new();
        let (segment, rotated) = match active {
            Some(name) => {
                let existing = self.backend.read_to_string(&name)?.unwrap_or_default();
                let results = codec::scan(&existing);
                let count = results
                    .iter()
                    .filter(|r| matches!(r, ParsedEntry::Parsed(_)))
                    .count();
                let dangling = matches!(
                    results.last(),
                    Some(ParsedEntry::Skipped(SkipReason::Truncated { .. }))
                );
                if dangling {
                    warn!(segment = %name, "segment ends inside an entry, rotating");
                    (self.namer.next(Some(&name))?, true)
                } else if count >= self.log_limit {
                    debug!(segment = %name, count, log_limit = self.log_limit, "segment full, rotating");
                    (self.namer.next(Some(&name))?, true)
                } else {
                    if !existing.is_empty() && !existing.ends_with('\n') {
                        text.push('\n');
                    }
                    (name, false)
                }
            }
            None => (self.namer.next(None)?, false),
        };

        text.push_str(&codec::encode(batch));
        self.backend
            .append(&segment, text.as_bytes())
            .map_err(|source| CoreError::SegmentWrite {
                segment: segment.clone(),
                source,
            })?;
        debug!(segment = %segment, entries = batch.len(), rotated, "appended batch");

        self.current = Some(segment.clone());
        Ok(AppendOutcome {
            segment,
            rotated,
            written: batch.len(),
        })
    }
}

impl std::fmt::Debug for SegmentedLogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentedLogStore")
            .field("namer", &self.namer)
            .field("log_limit", &self.log_limit)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SEPARATOR;
    use chrono::{NaiveDate, NaiveDateTime};
    use recallvault_storage::{InMemoryBackend, StorageError, StorageResult};
    use std::fs;
    use tempfile::TempDir;

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, minute, 0)
            .unwrap()
    }

    fn batch_of(bodies: &[&str]) -> EntryBatch {
        bodies
            .iter()
            .enumerate()
            .map(|(i, body)| Entry::new(at(i as u32), *body))
            .collect()
    }

    fn memory_store(log_limit: usize) -> SegmentedLogStore {
        SegmentedLogStore::with_backend(Box::new(InMemoryBackend::new()), log_limit)
    }

    #[test]
    fn read_of_empty_project_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = SegmentedLogStore::open(dir.path(), 10).unwrap();
        assert!(store.read(None).unwrap().is_empty());
        assert!(store.read(Some("log_1.txt")).unwrap().is_empty());
        assert_eq!(store.latest_segment().unwrap(), None);
        assert_eq!(store.latest_entry().unwrap(), None);
        assert!(store.segments().unwrap().is_empty());
    }

    #[test]
    fn open_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let err = SegmentedLogStore::open(dir.path().join("nope"), 10).unwrap_err();
        assert!(err.is_directory_not_found());
    }

    #[test]
    fn first_append_creates_log_1() {
        let dir = TempDir::new().unwrap();
        let mut store = SegmentedLogStore::open(dir.path(), 10).unwrap();

        let outcome = store.append(&batch_of(&["hello"])).unwrap();
        assert_eq!(outcome.segment, "log_1.txt");
        assert!(!outcome.rotated);
        assert_eq!(outcome.written, 1);

        let text = fs::read_to_string(dir.path().join("log_1.txt")).unwrap();
        assert_eq!(text, format!("[2024-01-15 09:00:00] - hello\n{SEPARATOR}\n"));
    }

    #[test]
    fn empty_batch_is_rejected() {
        let mut store = memory_store(10);
        let err = store.append(&EntryBatch::new()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOperation { .. }));
        assert!(store.segments().unwrap().is_empty());
    }

    #[test]
    fn no_rotation_below_capacity() {
        let mut store = memory_store(3);
        store.append(&batch_of(&["a", "b"])).unwrap();

        let outcome = store.append(&batch_of(&["c"])).unwrap();
        assert_eq!(outcome.segment, "log_1.txt");
        assert!(!outcome.rotated);
        assert_eq!(store.read(Some("log_1.txt")).unwrap().len(), 3);
    }

    #[test]
    fn rotation_at_capacity() {
        let mut store = memory_store(3);
        store.append(&batch_of(&["a", "b", "c"])).unwrap();

        let outcome = store.append(&batch_of(&["d", "e"])).unwrap();
        assert_eq!(outcome.segment, "log_2.txt");
        assert!(outcome.rotated);
        assert_eq!(store.read(Some("log_1.txt")).unwrap().len(), 3);
        assert_eq!(store.read(Some("log_2.txt")).unwrap().len(), 2);
    }

    #[test]
    fn batch_is_never_split() {
        let mut store = memory_store(2);
        store.append(&batch_of(&["a"])).unwrap();

        let outcome = store.append(&batch_of(&["b", "c", "d"])).unwrap();
        assert_eq!(outcome.segment, "log_1.txt");
        assert_eq!(store.read(Some("log_1.txt")).unwrap().len(), 4);

        let outcome = store.append(&batch_of(&["e"])).unwrap();
        assert_eq!(outcome.segment, "log_2.txt");
        assert!(outcome.rotated);
    }

    #[test]
    fn capacity_two_scenario() {
        let dir = TempDir::new().unwrap();
        let mut store = SegmentedLogStore::open(dir.path(), 2).unwrap();

        for body in ["A", "B", "C"] {
            store.append(&batch_of(&[body])).unwrap();
        }

        let first = store.read(Some("log_1.txt")).unwrap();
        let second = store.read(Some("log_2.txt")).unwrap();
        let bodies = |b: &EntryBatch| b.iter().map(|e| e.body().to_string()).collect::<Vec<_>>();
        assert_eq!(bodies(&first), vec!["A", "B"]);
        assert_eq!(bodies(&second), vec!["C"]);
        assert_eq!(store.latest_segment().unwrap().as_deref(), Some("log_2.txt"));
    }

    #[test]
    fn append_resumes_latest_existing_segment() {
        let backend = InMemoryBackend::with_files([
            ("log_1.txt", format!("[2024-01-01 00:00:00] - old\n{SEPARATOR}\n")),
            ("log_2.txt", format!("[2024-01-02 00:00:00] - newer\n{SEPARATOR}\n")),
        ]);
        let mut store = SegmentedLogStore::with_backend(Box::new(backend), 5);

        let outcome = store.append(&batch_of(&["next"])).unwrap();
        assert_eq!(outcome.segment, "log_2.txt");
        assert_eq!(store.current_segment(), Some("log_2.txt"));
        assert_eq!(store.read(Some("log_2.txt")).unwrap().len(), 2);
    }

    #[test]
    fn rotation_past_nine_orders_numerically() {
        let mut store = memory_store(1);
        for i in 0..11 {
            store
                .append(&batch_of(&[format!("entry {i}").as_str()]))
                .unwrap();
        }

        let segments = store.segments().unwrap();
        assert_eq!(segments.len(), 11);
        assert_eq!(segments.last().map(String::as_str), Some("log_11.txt"));
        assert_eq!(store.latest_segment().unwrap().as_deref(), Some("log_11.txt"));

        let latest = store.latest_entry().unwrap().unwrap();
        assert_eq!(latest.body(), "entry 10");
    }

    #[test]
    fn zero_capacity_rotates_every_append() {
        let mut store = memory_store(0);
        assert_eq!(store.append(&batch_of(&["a"])).unwrap().segment, "log_1.txt");
        let outcome = store.append(&batch_of(&["b"])).unwrap();
        assert_eq!(outcome.segment, "log_2.txt");
        assert!(outcome.rotated);
    }

    #[test]
    fn cache_is_per_instance() {
        let dir = TempDir::new().unwrap();
        let mut writer = SegmentedLogStore::open(dir.path(), 1).unwrap();
        writer.append(&batch_of(&["a"])).unwrap();

        let mut other = SegmentedLogStore::open(dir.path(), 1).unwrap();
        assert_eq!(other.current_segment(), None);
        other.append(&batch_of(&["b"])).unwrap();
        assert_eq!(other.current_segment(), Some("log_2.txt"));

        // The first instance still points at its own cached segment.
        assert_eq!(writer.current_segment(), Some("log_1.txt"));
        assert_eq!(writer.latest_segment().unwrap().as_deref(), Some("log_2.txt"));
    }

    #[test]
    fn read_all_spans_segments_in_order() {
        let mut store = memory_store(2);
        for body in ["1", "2", "3", "4", "5"] {
            store.append(&batch_of(&[body])).unwrap();
        }
        let all = store.read_all().unwrap();
        let bodies: Vec<_> = all.iter().map(Entry::body).collect();
        assert_eq!(bodies, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn dangling_tail_moves_append_to_next_segment() {
        let tail = format!(
            "[2024-01-01 00:00:00] - done\n{SEPARATOR}\n[2024-01-01 00:01:00] - cut\n"
        );
        let backend = InMemoryBackend::with_files([("log_1.txt", tail)]);
        let mut store = SegmentedLogStore::with_backend(Box::new(backend), 5);

        let outcome = store.append(&batch_of(&["fresh"])).unwrap();
        assert_eq!(outcome.segment, "log_2.txt");
        assert!(outcome.rotated);

        let bodies: Vec<_> = store
            .read(Some("log_2.txt"))
            .unwrap()
            .iter()
            .map(|e| e.body().to_string())
            .collect();
        assert_eq!(bodies, ["fresh"]);

        let old = store.read(Some("log_1.txt")).unwrap();
        assert_eq!(old.len(), 1);
        assert_eq!(old.iter().next().unwrap().body(), "done");
        assert!(matches!(
            store.scan("log_1.txt").unwrap().last(),
            Some(ParsedEntry::Skipped(SkipReason::Truncated { line: 3 }))
        ));
    }

    #[test]
    fn missing_final_line_break_is_restored_before_append() {
        let backend = InMemoryBackend::with_files([(
            "log_1.txt",
            format!("[2024-01-01 00:00:00] - done\n{SEPARATOR}\nstray note"),
        )]);
        let mut store = SegmentedLogStore::with_backend(Box::new(backend), 5);

        let outcome = store.append(&batch_of(&["fresh"])).unwrap();
        assert_eq!(outcome.segment, "log_1.txt");
        assert!(!outcome.rotated);

        let bodies: Vec<_> = store
            .read(Some("log_1.txt"))
            .unwrap()
            .iter()
            .map(|e| e.body().to_string())
            .collect();
        assert_eq!(bodies, ["done", "fresh"]);
    }

    #[test]
    fn separator_line_in_body_is_rejected_before_writing() {
        let backend = InMemoryBackend::new();
        let mut store = SegmentedLogStore::with_backend(Box::new(backend), 5);

        let body = format!("notes\n{SEPARATOR}\nmore notes");
        let batch = batch_of(&["fine", body.as_str()]);
        let err = store.append(&batch).unwrap_err();
        assert!(matches!(err, CoreError::Format { .. }));

        assert_eq!(store.latest_segment().unwrap(), None);
        assert_eq!(store.current_segment(), None);
    }

    #[test]
    fn invalid_utf8_damages_only_its_entry() {
        let dir = TempDir::new().unwrap();
        let mut bytes = format!("[2024-01-01 00:00:00] - good\n{SEPARATOR}\n").into_bytes();
        bytes.extend_from_slice(b"[2024-01-01 00:01:00] - caf");
        bytes.push(0xe9);
        bytes.extend_from_slice(format!("\n{SEPARATOR}\n").as_bytes());
        fs::write(dir.path().join("log_1.txt"), bytes).unwrap();

        let mut store = SegmentedLogStore::open(dir.path(), 5).unwrap();
        let entries = store.read(Some("log_1.txt")).unwrap();
        let bodies: Vec<_> = entries.iter().map(|e| e.body().to_string()).collect();
        assert_eq!(bodies, ["good", "caf\u{fffd}"]);

        let outcome = store.append(&batch_of(&["fresh"])).unwrap();
        assert_eq!(outcome.segment, "log_1.txt");
        assert_eq!(store.read(Some("log_1.txt")).unwrap().len(), 3);
    }

    #[test]
    fn scan_reports_skipped_entries() {
        let backend = InMemoryBackend::with_files([(
            "log_1.txt",
            format!("[bad] - header\n{SEPARATOR}\n[2024-01-01 00:00:00] - good\n{SEPARATOR}\n"),
        )]);
        let store = SegmentedLogStore::with_backend(Box::new(backend), 2);

        let results = store.scan("log_1.txt").unwrap();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], ParsedEntry::Skipped(_)));
        assert!(matches!(results[1], ParsedEntry::Parsed(_)));
        assert!(store.scan("log_9.txt").unwrap().is_empty());
    }

    #[test]
    fn segment_path_points_into_directory() {
        let dir = TempDir::new().unwrap();
        let store = SegmentedLogStore::open(dir.path(), 2).unwrap();
        assert_eq!(
            store.segment_path("log_1.txt"),
            Some(dir.path().join("log_1.txt"))
        );
        assert_eq!(memory_store(2).segment_path("log_1.txt"), None);
    }

    struct FailingBackend;

    impl SegmentBackend for FailingBackend {
        fn list(&self) -> StorageResult<Vec<String>> {
            Ok(Vec::new())
        }

        fn read_to_string(&self, _name: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn append(&mut self, _name: &str, _data: &[u8]) -> StorageResult<u64> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn exists(&self, _name: &str) -> StorageResult<bool> {
            Ok(false)
        }
    }

    #[test]
    fn write_failure_is_segment_write_error() {
        let mut store = SegmentedLogStore::with_backend(Box::new(FailingBackend), 2);
        let err = store.append(&batch_of(&["x"])).unwrap_err();
        match err {
            CoreError::SegmentWrite { segment, .. } => assert_eq!(segment, "log_1.txt"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.current_segment(), None);
    }
}
