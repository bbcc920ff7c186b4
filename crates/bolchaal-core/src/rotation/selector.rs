//! Next-mode selection.
//!
//! Order of decisions:
//! 1. unlocked modes for the learner's week
//! 2. minus a mode that would repeat a third time
//! 3. privileged boost while that mode is under its frequency floor
//! 4. inverse-frequency weighted draw over what remains
//!
//! Selection never fails; an empty candidate list falls back to the first
//! catalog mode, which is always unlocked.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::eligibility::{eligible_modes, repeat_blocked};
use super::frequency::recent_frequency;
use super::random::RandomSource;
use super::RotationConfig;
use crate::history::HistoryEntry;
use crate::mode::{ModeCatalog, ModeId};
use crate::week::{current_week, WeekNumber};

/// Chooses lesson modes from a catalog using an injected random source.
#[derive(Debug, Clone)]
pub struct ModeSelector<R> {
    catalog: ModeCatalog,
    config: RotationConfig,
    rng: R,
}

impl<R: RandomSource> ModeSelector<R> {
    /// Selector over the built-in catalog with default tunables.
    pub fn new(rng: R) -> Self {
        Self {
            catalog: ModeCatalog::builtin(),
            config: RotationConfig::default(),
            rng,
        }
    }

    pub fn with_catalog(mut self, catalog: ModeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_config(mut self, config: RotationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &ModeCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Pick the next mode for `week` given the history snapshot.
    ///
    /// The result is always unlocked at `week`.
    pub fn select_next_mode(&mut self, history: &[HistoryEntry], week: WeekNumber) -> ModeId {
        let unlocked = self.catalog.unlocked(week);
        let candidates = eligible_modes(&unlocked, history);

        if let Some(mode) = self.privileged_boost(&candidates, history) {
            debug!(%mode, %week, "privileged mode boosted");
            return mode;
        }

        if let Some(mode) = self.weighted_pick(&candidates, history) {
            debug!(%mode, %week, candidates = candidates.len(), "weighted pick");
            return mode;
        }

        let fallback = self.catalog.first();
        warn!(%fallback, %week, "no candidates; falling back to first mode");
        fallback
    }

    /// Honour `preferred` some of the time when it is unlocked and eligible,
    /// otherwise defer to [`Self::select_next_mode`].
    pub fn recommended_mode(
        &mut self,
        history: &[HistoryEntry],
        first_lesson: Option<DateTime<Utc>>,
        preferred: Option<ModeId>,
        now: DateTime<Utc>,
    ) -> ModeId {
        let week = current_week(first_lesson, now);

        if let Some(preferred) = preferred {
            let unlocked = self.catalog.unlocked(week);
            if unlocked.contains(&preferred)
                && eligible_modes(&unlocked, history).contains(&preferred)
                && self.rng.next_unit() < self.config.preferred_probability
            {
                debug!(mode = %preferred, %week, "honouring preferred mode");
                return preferred;
            }
        }

        self.select_next_mode(history, week)
    }

    /// Returns the privileged mode when it is under its floor, still a
    /// candidate, not about to repeat a third time, and the boost draw hits.
    fn privileged_boost(&mut self, candidates: &[ModeId], history: &[HistoryEntry]) -> Option<ModeId> {
        let (mode, min_frequency) = self.catalog.privileged()?;
        if !candidates.contains(&mode) || repeat_blocked(history) == Some(mode) {
            return None;
        }
        let observed = recent_frequency(mode, history, self.config.window_size);
        if observed >= min_frequency {
            return None;
        }
        (self.rng.next_unit() < self.config.boost_probability).then_some(mode)
    }

    fn weighted_pick(&mut self, candidates: &[ModeId], history: &[HistoryEntry]) -> Option<ModeId> {
        let last = *candidates.last()?;
        let weights: Vec<f64> = candidates
            .iter()
            .map(|mode| self.weight(*mode, history))
            .collect();
        let total: f64 = weights.iter().sum();

        let mut remainder = self.rng.next_unit() * total;
        for (mode, weight) in candidates.iter().zip(&weights) {
            remainder -= weight;
            if remainder <= 0.0 {
                return Some(*mode);
            }
        }
        // Rounding can leave a sliver of remainder after the last weight.
        Some(last)
    }

    fn weight(&self, mode: ModeId, history: &[HistoryEntry]) -> f64 {
        let frequency = recent_frequency(mode, history, self.config.window_size);
        (1.0 - frequency).max(self.config.weight_floor)
    }
}
