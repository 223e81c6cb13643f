//! Segment file naming.

use crate::error::{CoreError, CoreResult};
use recallvault_storage::SegmentBackend;

/// Default segment file prefix.
pub const DEFAULT_PREFIX: &str = "log";

/// Default segment file extension.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Derives segment names of the form `<prefix>_<N>.<extension>`.
///
/// The directory listing is the only index: the active segment is whichever
/// name carries the highest number. Numbers are compared numerically, so
/// `log_10.txt` comes after `log_9.txt`. Names are not zero-padded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentNamer {
    prefix: String,
    extension: String,
}

impl Default for SegmentNamer {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_EXTENSION)
    }
}

impl SegmentNamer {
    /// Creates a namer with a custom prefix and extension.
    #[must_use]
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    /// Returns the name of segment `n`.
    #[must_use]
    pub fn name_for(&self, n: u64) -> String {
        format!("{}_{}.{}", self.prefix, n, self.extension)
    }

    /// Parses the segment number out of a name.
    ///
    /// Returns `None` for names that do not follow the convention,
    /// including zero-padded numbers such as `log_01.txt`.
    #[must_use]
    pub fn number_of(&self, name: &str) -> Option<u64> {
        let digits = name
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix('_')?
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        // Segment numbers start at 1 and are never zero-padded.
        if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Returns the segment with the highest number among `names`.
    pub fn latest_of<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
        names
            .into_iter()
            .filter_map(|name| self.number_of(name).map(|n| (n, name)))
            .max_by_key(|&(n, _)| n)
            .map(|(_, name)| name)
    }

    /// Scans a backend for its latest segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be listed.
    pub fn latest(&self, backend: &dyn SegmentBackend) -> CoreResult<Option<String>> {
        let names = backend.list()?;
        Ok(self
            .latest_of(names.iter().map(String::as_str))
            .map(str::to_string))
    }

    /// Lists every segment in a backend, lowest number first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be listed.
    pub fn segments(&self, backend: &dyn SegmentBackend) -> CoreResult<Vec<String>> {
        let mut numbered: Vec<(u64, String)> = backend
            .list()?
            .into_iter()
            .filter_map(|name| self.number_of(&name).map(|n| (n, name)))
            .collect();
        numbered.sort_by_key(|&(n, _)| n);
        Ok(numbered.into_iter().map(|(_, name)| name).collect())
    }

    /// Returns the name that follows `current`, or the first name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSegmentName`] if `current` does not follow
    /// the naming convention or its number cannot be incremented.
    pub fn next(&self, current: Option<&str>) -> CoreResult<String> {
        let Some(current) = current else {
            return Ok(self.name_for(1));
        };
        let n = self
            .number_of(current)
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| CoreError::InvalidSegmentName {
                name: current.to_string(),
            })?;
        Ok(self.name_for(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recallvault_storage::InMemoryBackend;

    #[test]
    fn first_segment_is_one() {
        let namer = SegmentNamer::default();
        assert_eq!(namer.next(None).unwrap(), "log_1.txt");
    }

    #[test]
    fn next_increments_suffix() {
        let namer = SegmentNamer::default();
        assert_eq!(namer.next(Some("log_1.txt")).unwrap(), "log_2.txt");
        assert_eq!(namer.next(Some("log_9.txt")).unwrap(), "log_10.txt");
    }

    #[test]
    fn next_rejects_foreign_names() {
        let namer = SegmentNamer::default();
        for name in ["notes.txt", "log_.txt", "log_x.txt", "log_1.md", "log1.txt"] {
            assert!(
                matches!(
                    namer.next(Some(name)),
                    Err(CoreError::InvalidSegmentName { .. })
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn number_of_parses_convention() {
        let namer = SegmentNamer::default();
        assert_eq!(namer.number_of("log_12.txt"), Some(12));
        assert_eq!(namer.number_of("log_+1.txt"), None);
        assert_eq!(namer.number_of("logbook.txt"), None);
    }

    #[test]
    fn zero_padded_names_are_not_segments() {
        let namer = SegmentNamer::default();
        assert_eq!(namer.number_of("log_01.txt"), None);
        assert_eq!(namer.number_of("log_0.txt"), None);

        let names = ["log_01.txt", "log_1.txt", "log_007.txt"];
        assert_eq!(namer.latest_of(names), Some("log_1.txt"));
        assert_eq!(namer.latest_of(names.iter().rev().copied()), Some("log_1.txt"));
    }

    #[test]
    fn latest_orders_numerically() {
        let namer = SegmentNamer::default();
        let names = ["log_1.txt", "log_10.txt", "log_2.txt", "log_9.txt"];
        assert_eq!(namer.latest_of(names), Some("log_10.txt"));
    }

    #[test]
    fn latest_ignores_other_files() {
        let backend = InMemoryBackend::with_files([
            ("config.json", "{}"),
            ("log_3.txt", ""),
            ("logbook.txt", ""),
            ("log_old.txt", ""),
        ]);
        let namer = SegmentNamer::default();
        assert_eq!(namer.latest(&backend).unwrap().as_deref(), Some("log_3.txt"));
    }

    #[test]
    fn latest_of_empty_directory_is_none() {
        let namer = SegmentNamer::default();
        assert_eq!(namer.latest(&InMemoryBackend::new()).unwrap(), None);
    }

    #[test]
    fn segments_sorted_numerically() {
        let backend = InMemoryBackend::with_files([
            ("log_10.txt", ""),
            ("log_2.txt", ""),
            ("log_1.txt", ""),
            ("readme", ""),
        ]);
        let namer = SegmentNamer::default();
        assert_eq!(
            namer.segments(&backend).unwrap(),
            vec!["log_1.txt", "log_2.txt", "log_10.txt"]
        );
    }

    #[test]
    fn custom_prefix_and_extension() {
        let namer = SegmentNamer::new("journal", "md");
        assert_eq!(namer.next(None).unwrap(), "journal_1.md");
        assert_eq!(namer.number_of("journal_4.md"), Some(4));
        assert_eq!(namer.number_of("log_4.txt"), None);
    }
}
