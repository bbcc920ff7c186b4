//! How often a mode showed up in the trailing window of history.

use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;
use crate::mode::{ModeCatalog, ModeId};

/// Default trailing window, in lessons.
pub const DEFAULT_WINDOW: usize = 10;

/// The last `window` entries, or all of them when fewer exist.
fn trailing(history: &[HistoryEntry], window: usize) -> &[HistoryEntry] {
    &history[history.len().saturating_sub(window)..]
}

/// Fraction (0.0-1.0) of the trailing window equal to `mode`.
///
/// Returns 0.0 for an empty history or a zero window.
pub fn recent_frequency(mode: ModeId, history: &[HistoryEntry], window: usize) -> f64 {
    let recent = trailing(history, window);
    if recent.is_empty() {
        return 0.0;
    }
    let hits = recent.iter().filter(|e| e.mode == mode).count();
    hits as f64 / recent.len() as f64
}

/// Per-mode share of the trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeFrequency {
    pub mode: ModeId,
    pub count: usize,
    pub fraction: f64,
}

/// Frequency breakdown over every catalog mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyReport {
    pub window: usize,
    /// Entries actually inspected (at most `window`).
    pub sampled: usize,
    pub modes: Vec<ModeFrequency>,
}

pub fn frequency_report(
    catalog: &ModeCatalog,
    history: &[HistoryEntry],
    window: usize,
) -> FrequencyReport {
    let recent = trailing(history, window);
    let modes = catalog
        .modes()
        .iter()
        .map(|def| {
            let count = recent.iter().filter(|e| e.mode == def.id).count();
            ModeFrequency {
                mode: def.id,
                count,
                fraction: recent_frequency(def.id, history, window),
            }
        })
        .collect();

    FrequencyReport {
        window,
        sampled: recent.len(),
        modes,
    }
}
