//! Ordered batches of entries.

use crate::entry::Entry;
use crate::error::{CoreError, CoreResult};
use chrono::NaiveDate;
use serde::Serialize;

/// An ordered sequence of entries.
///
/// Order is append/read order; a batch is never re-sorted. Batches are what
/// the log store reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryBatch {
    entries: Vec<Entry>,
}

impl EntryBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the end.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the batch holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Returns the entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the most recently appended entry.
    #[must_use]
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Consumes the batch and returns its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Splits into the first `n` entries and the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InsufficientEntries`] if the batch holds `n` or
    /// fewer entries, since the remainder would be empty.
    pub fn split(&self, n: usize) -> CoreResult<(Self, Self)> {
        if self.entries.len() <= n {
            return Err(CoreError::InsufficientEntries {
                requested: n,
                available: self.entries.len(),
            });
        }
        let (head, tail) = self.entries.split_at(n);
        Ok((Self::from(head.to_vec()), Self::from(tail.to_vec())))
    }

    /// Returns the entries whose body contains `fragment`.
    #[must_use]
    pub fn containing(&self, fragment: &str) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.body().contains(fragment))
            .collect()
    }

    /// Returns the entries written on `date`.
    #[must_use]
    pub fn on_date(&self, date: NaiveDate) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.timestamp().date() == date)
            .collect()
    }
}

impl From<Vec<Entry>> for EntryBatch {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<Entry> for EntryBatch {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<Entry> for EntryBatch {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for EntryBatch {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntryBatch {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
