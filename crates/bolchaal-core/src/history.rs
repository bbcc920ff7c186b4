//! Capped log of completed lessons and the storage seam behind it.
//!
//! The selector only ever reads a snapshot ([`ModeHistory::entries`]); the
//! caller appends through a [`HistoryStore`] once a lesson completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mode::ModeId;

/// Maximum number of entries kept; older ones are evicted first.
pub const HISTORY_CAPACITY: usize = 50;

/// One completed lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub mode: ModeId,
    pub completed_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(mode: ModeId, completed_at: DateTime<Utc>) -> Self {
        Self { mode, completed_at }
    }

    pub fn now(mode: ModeId) -> Self {
        Self::new(mode, Utc::now())
    }
}

/// Append-only, time-ordered lesson log holding at most [`HISTORY_CAPACITY`] entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeHistory {
    entries: Vec<HistoryEntry>,
}

impl ModeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries: sorts by completion time and keeps the
    /// newest [`HISTORY_CAPACITY`].
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.sort_by_key(|e| e.completed_at);
        Self::from_appended(entries)
    }

    /// Build from entries already in append order, keeping the last
    /// [`HISTORY_CAPACITY`]. Timestamps are not consulted, so a clock that
    /// went backwards does not reorder the log.
    pub fn from_appended(mut entries: Vec<HistoryEntry>) -> Self {
        if entries.len() > HISTORY_CAPACITY {
            let excess = entries.len() - HISTORY_CAPACITY;
            entries.drain(..excess);
        }
        Self { entries }
    }

    /// Append an entry, returning the evicted oldest entry when full.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push(entry);
        if self.entries.len() > HISTORY_CAPACITY {
            Some(self.entries.remove(0))
        } else {
            None
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Persistence for the lesson log.
///
/// Implementations keep the first-lesson timestamp apart from the capped log
/// so that evicting old entries does not reset the learner's week.
pub trait HistoryStore {
    /// Snapshot of the stored log, oldest first.
    fn load(&self) -> Result<ModeHistory>;

    /// Append a completed lesson, evicting beyond [`HISTORY_CAPACITY`].
    fn append(&mut self, entry: HistoryEntry) -> Result<()>;

    /// Completion time of the very first lesson ever recorded.
    fn first_lesson_at(&self) -> Result<Option<DateTime<Utc>>>;

    /// Forget all lessons, including the first-lesson timestamp.
    fn clear(&mut self) -> Result<()>;
}

/// In-process store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    history: ModeHistory,
    first_lesson_at: Option<DateTime<Utc>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing entries.
    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        let first_lesson_at = entries.iter().map(|e| e.completed_at).min();
        Self {
            history: ModeHistory::from_entries(entries),
            first_lesson_at,
        }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<ModeHistory> {
        Ok(self.history.clone())
    }

    fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        if self.first_lesson_at.is_none() {
            self.first_lesson_at = Some(entry.completed_at);
        }
        self.history.push(entry);
        Ok(())
    }

    fn first_lesson_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.first_lesson_at)
    }

    fn clear(&mut self) -> Result<()> {
        self.history.clear();
        self.first_lesson_at = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entries(n: usize) -> Vec<HistoryEntry> {
        let base = Utc::now() - Duration::days(60);
        (0..n)
            .map(|i| {
                let mode = if i % 2 == 0 { ModeId::Flashcard } else { ModeId::PhoneCall };
                HistoryEntry::new(mode, base + Duration::hours(i as i64))
            })
            .collect()
    }

    #[test]
    fn push_evicts_oldest_beyond_capacity() {
        let all = entries(HISTORY_CAPACITY + 1);
        let mut history = ModeHistory::new();
        for entry in &all[..HISTORY_CAPACITY] {
            assert!(history.push(*entry).is_none());
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);

        let evicted = history.push(all[HISTORY_CAPACITY]);
        assert_eq!(evicted, Some(all[0]));
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries()[0], all[1]);
        assert_eq!(history.last(), Some(&all[HISTORY_CAPACITY]));
    }

    #[test]
    fn from_entries_sorts_and_truncates() {
        let mut all = entries(60);
        all.reverse();
        let history = ModeHistory::from_entries(all.clone());
        assert_eq!(history.len(), HISTORY_CAPACITY);
        let times: Vec<_> = history.entries().iter().map(|e| e.completed_at).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(history.last(), Some(&all[0]));
    }

    #[test]
    fn from_appended_keeps_given_order() {
        let mut all = entries(HISTORY_CAPACITY + 3);
        all.reverse();
        let history = ModeHistory::from_appended(all.clone());
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries(), &all[3..]);
    }

    #[test]
    fn memory_store_keeps_first_lesson_after_eviction() {
        let all = entries(HISTORY_CAPACITY + 5);
        let mut store = MemoryHistoryStore::new();
        for entry in &all {
            store.append(*entry).unwrap();
        }
        assert_eq!(store.load().unwrap().len(), HISTORY_CAPACITY);
        assert_eq!(store.first_lesson_at().unwrap(), Some(all[0].completed_at));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
        assert!(store.first_lesson_at().unwrap().is_none());
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut history = ModeHistory::new();
        history.push(HistoryEntry::now(ModeId::Flashcard));
        let json = serde_json::to_value(&history).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["mode"], "flashcard");
    }
}
