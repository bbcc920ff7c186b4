//! Lesson modes and the catalog that says when each one unlocks.

mod catalog;

pub use catalog::{ModeCatalog, ModeDefinition};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Lesson presentation formats offered to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeId {
    /// Simulated phone call with a recurring family character
    PhoneCall,
    /// Answer before the clock runs out
    TimedPressure,
    /// Conversation with several relatives at once
    MultiCharacter,
    /// Guided, one phrase at a time
    StepByStep,
    /// Plain flashcard review
    Flashcard,
}

impl ModeId {
    /// Every mode, in declaration order.
    pub const ALL: [ModeId; 5] = [
        ModeId::PhoneCall,
        ModeId::TimedPressure,
        ModeId::MultiCharacter,
        ModeId::StepByStep,
        ModeId::Flashcard,
    ];

    /// Stable snake_case identifier, used for storage and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeId::PhoneCall => "phone_call",
            ModeId::TimedPressure => "timed_pressure",
            ModeId::MultiCharacter => "multi_character",
            ModeId::StepByStep => "step_by_step",
            ModeId::Flashcard => "flashcard",
        }
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ModeId::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_and_kebab_case() {
        assert_eq!("phone_call".parse::<ModeId>().unwrap(), ModeId::PhoneCall);
        assert_eq!("Step-By-Step".parse::<ModeId>().unwrap(), ModeId::StepByStep);
        assert!("karaoke".parse::<ModeId>().is_err());
    }

    #[test]
    fn display_matches_serde_name() {
        for mode in ModeId::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
        }
    }
}
