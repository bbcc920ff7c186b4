//! "No three in a row" filtering.

use crate::history::HistoryEntry;
use crate::mode::ModeId;

/// The mode that would make a third consecutive repeat, if any.
pub fn repeat_blocked(history: &[HistoryEntry]) -> Option<ModeId> {
    match history {
        [.., a, b] if a.mode == b.mode => Some(b.mode),
        _ => None,
    }
}

/// Unlocked modes minus the one repeated in the last two lessons.
///
/// Best effort: when that would leave nothing (a single unlocked mode), all
/// unlocked modes are returned unchanged.
pub fn eligible_modes(unlocked: &[ModeId], history: &[HistoryEntry]) -> Vec<ModeId> {
    let Some(blocked) = repeat_blocked(history) else {
        return unlocked.to_vec();
    };
    let filtered: Vec<ModeId> = unlocked.iter().copied().filter(|m| *m != blocked).collect();
    if filtered.is_empty() {
        unlocked.to_vec()
    } else {
        filtered
    }
}
