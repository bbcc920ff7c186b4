//! Ties a history store to the selector.
//!
//! The selector stays pure; this is where history is loaded before a lesson
//! and the completed lesson is written back afterwards.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::Result;
use crate::history::{HistoryEntry, HistoryStore, ModeHistory};
use crate::mode::ModeId;
use crate::rotation::{frequency_report, FrequencyReport, ModeSelector, RandomSource};
use crate::week::{current_week, WeekNumber};

pub struct LessonTracker<S, R> {
    store: S,
    selector: ModeSelector<R>,
}

impl<S: HistoryStore, R: RandomSource> LessonTracker<S, R> {
    pub fn new(store: S, selector: ModeSelector<R>) -> Self {
        Self { store, selector }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selector(&self) -> &ModeSelector<R> {
        &self.selector
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn history(&self) -> Result<ModeHistory> {
        self.store.load()
    }

    pub fn current_week(&self, now: DateTime<Utc>) -> Result<WeekNumber> {
        Ok(current_week(self.store.first_lesson_at()?, now))
    }

    /// Recommend the next lesson mode from the stored history.
    ///
    /// Nothing is written; call [`Self::record_completion`] once the lesson ends.
    pub fn next_mode(&mut self, preferred: Option<ModeId>, now: DateTime<Utc>) -> Result<ModeId> {
        let history = self.store.load()?;
        let first_lesson = self.store.first_lesson_at()?;
        Ok(self
            .selector
            .recommended_mode(history.entries(), first_lesson, preferred, now))
    }

    /// Append a completed lesson to the store.
    pub fn record_completion(&mut self, mode: ModeId, completed_at: DateTime<Utc>) -> Result<HistoryEntry> {
        let entry = HistoryEntry::new(mode, completed_at);
        self.store.append(entry)?;
        info!(%mode, completed_at = %completed_at.to_rfc3339(), "lesson recorded");
        Ok(entry)
    }

    pub fn frequency_report(&self, window: usize) -> Result<FrequencyReport> {
        let history = self.store.load()?;
        Ok(frequency_report(self.selector.catalog(), history.entries(), window))
    }
}
