//! Static table of lesson modes.
//!
//! Each definition carries the week it unlocks at and, for at most one
//! privileged mode, the share of recent lessons it should hold.

use serde::{Deserialize, Serialize};

use super::ModeId;
use crate::error::ValidationError;
use crate::week::WeekNumber;

/// Metadata for a single lesson mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDefinition {
    pub id: ModeId,
    pub name: String,
    /// Earliest week this mode may be offered.
    pub unlock_week: u32,
    /// Target fraction of recent history; only the privileged mode sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_frequency: Option<f64>,
}

impl ModeDefinition {
    pub fn new(id: ModeId, name: impl Into<String>, unlock_week: u32) -> Self {
        Self {
            id,
            name: name.into(),
            unlock_week,
            min_frequency: None,
        }
    }

    /// Mark this mode as privileged with the given frequency floor.
    pub fn with_min_frequency(mut self, min_frequency: f64) -> Self {
        self.min_frequency = Some(min_frequency);
        self
    }

    pub fn is_unlocked(&self, week: WeekNumber) -> bool {
        self.unlock_week <= week.get()
    }
}

/// Ordered, validated set of mode definitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeCatalog {
    modes: Vec<ModeDefinition>,
}

impl ModeCatalog {
    /// Build a catalog, checking it is usable by the selector.
    ///
    /// # Errors
    /// Returns an error if the table is empty, the first mode does not unlock
    /// at week 1, ids repeat, an unlock week is 0, a frequency floor is
    /// outside `(0, 1]`, or more than one mode is privileged.
    pub fn new(modes: Vec<ModeDefinition>) -> Result<Self, ValidationError> {
        let first = modes
            .first()
            .ok_or_else(|| ValidationError::InvalidCatalog("catalog is empty".into()))?;
        if first.unlock_week != 1 {
            return Err(ValidationError::InvalidCatalog(format!(
                "first mode '{}' must unlock at week 1",
                first.id
            )));
        }

        let mut privileged = 0;
        for (i, def) in modes.iter().enumerate() {
            if modes[..i].iter().any(|d| d.id == def.id) {
                return Err(ValidationError::InvalidCatalog(format!(
                    "duplicate mode '{}'",
                    def.id
                )));
            }
            if def.unlock_week == 0 {
                return Err(ValidationError::InvalidCatalog(format!(
                    "mode '{}' has unlock week 0",
                    def.id
                )));
            }
            if let Some(freq) = def.min_frequency {
                if !(freq > 0.0 && freq <= 1.0) {
                    return Err(ValidationError::InvalidCatalog(format!(
                        "mode '{}' has min frequency {freq} outside (0, 1]",
                        def.id
                    )));
                }
                privileged += 1;
            }
        }
        if privileged > 1 {
            return Err(ValidationError::InvalidCatalog(
                "at most one mode may set a min frequency".into(),
            ));
        }

        Ok(Self { modes })
    }

    /// The catalog shipped with the app.
    pub fn builtin() -> Self {
        Self {
            modes: vec![
                ModeDefinition::new(ModeId::PhoneCall, "Phone Call", 1).with_min_frequency(0.3),
                ModeDefinition::new(ModeId::Flashcard, "Flashcards", 1),
                ModeDefinition::new(ModeId::StepByStep, "Step by Step", 2),
                ModeDefinition::new(ModeId::TimedPressure, "Beat the Clock", 3),
                ModeDefinition::new(ModeId::MultiCharacter, "Family Gathering", 4),
            ],
        }
    }

    pub fn modes(&self) -> &[ModeDefinition] {
        &self.modes
    }

    pub fn get(&self, id: ModeId) -> Option<&ModeDefinition> {
        self.modes.iter().find(|d| d.id == id)
    }

    /// Modes available at `week`, in catalog order.
    pub fn unlocked(&self, week: WeekNumber) -> Vec<ModeId> {
        self.modes
            .iter()
            .filter(|d| d.is_unlocked(week))
            .map(|d| d.id)
            .collect()
    }

    pub fn is_unlocked(&self, id: ModeId, week: WeekNumber) -> bool {
        self.get(id).is_some_and(|d| d.is_unlocked(week))
    }

    /// The privileged mode and its frequency floor, if one is configured.
    pub fn privileged(&self) -> Option<(ModeId, f64)> {
        self.modes
            .iter()
            .find_map(|d| d.min_frequency.map(|f| (d.id, f)))
    }

    /// Always unlocked, since `new` requires it to open at week 1.
    pub fn first(&self) -> ModeId {
        self.modes[0].id
    }
}

impl Default for ModeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
