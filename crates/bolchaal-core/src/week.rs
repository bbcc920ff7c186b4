//! Learner week derived from the first recorded lesson.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One-based week counter. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WeekNumber(u32);

impl WeekNumber {
    pub const FIRST: WeekNumber = WeekNumber(1);

    /// Clamp `n` up to week 1.
    pub fn new(n: u32) -> Self {
        Self(n.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for WeekNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for WeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {}", self.0)
    }
}

impl TryFrom<u32> for WeekNumber {
    type Error = String;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        if n == 0 {
            Err("week number must be at least 1".into())
        } else {
            Ok(Self(n))
        }
    }
}

impl From<WeekNumber> for u32 {
    fn from(week: WeekNumber) -> Self {
        week.0
    }
}

/// `floor(elapsed_days / 7) + 1`, or week 1 before the first lesson.
///
/// A first lesson in the future (clock skew) also yields week 1.
pub fn current_week(first_lesson: Option<DateTime<Utc>>, now: DateTime<Utc>) -> WeekNumber {
    let Some(first) = first_lesson else {
        return WeekNumber::FIRST;
    };
    let elapsed_days = (now - first).num_days();
    if elapsed_days <= 0 {
        return WeekNumber::FIRST;
    }
    let weeks = u32::try_from(elapsed_days / 7).unwrap_or(u32::MAX - 1);
    WeekNumber::new(weeks + 1)
}
