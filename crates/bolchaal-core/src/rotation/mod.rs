//! Lesson-mode rotation.
//!
//! Picks the next lesson mode from the learner's recent history:
//!
//! - **Frequency**: share of each mode in a trailing window
//! - **Eligibility**: drops a mode that would appear three times in a row
//! - **Selection**: privileged-mode boost, then inverse-frequency weighted draw

mod eligibility;
mod frequency;
mod random;
mod selector;

pub use eligibility::{eligible_modes, repeat_blocked};
pub use frequency::{frequency_report, recent_frequency, FrequencyReport, ModeFrequency, DEFAULT_WINDOW};
pub use random::{PcgSource, RandomSource, RngSource, ScriptedRandom};
pub use selector::ModeSelector;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Tunables for the selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Trailing window used for recency, in lessons.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Chance of forcing the privileged mode while it is under its floor.
    #[serde(default = "default_boost_probability")]
    pub boost_probability: f64,
    /// Chance of honouring an explicit preferred mode.
    #[serde(default = "default_preferred_probability")]
    pub preferred_probability: f64,
    /// Lowest weight any eligible mode can get.
    #[serde(default = "default_weight_floor")]
    pub weight_floor: f64,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW
}
fn default_boost_probability() -> f64 {
    0.6
}
fn default_preferred_probability() -> f64 {
    0.4
}
fn default_weight_floor() -> f64 {
    0.1
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            boost_probability: default_boost_probability(),
            preferred_probability: default_preferred_probability(),
            weight_floor: default_weight_floor(),
        }
    }
}

impl RotationConfig {
    /// # Errors
    /// Returns an error if a probability is outside `[0, 1]`, the weight
    /// floor is outside `(0, 1]`, or the window is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let probabilities = [
            ("rotation.boost_probability", self.boost_probability),
            ("rotation.preferred_probability", self.preferred_probability),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: format!("{value} is not a probability"),
                });
            }
        }
        if !(self.weight_floor > 0.0 && self.weight_floor <= 1.0) {
            return Err(ValidationError::InvalidValue {
                field: "rotation.weight_floor".into(),
                message: format!("{} must be in (0, 1]", self.weight_floor),
            });
        }
        if self.window_size == 0 {
            return Err(ValidationError::InvalidValue {
                field: "rotation.window_size".into(),
                message: "window must hold at least one lesson".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RotationConfig::default();
        assert_eq!(config.window_size, 10);
        assert_eq!(config.boost_probability, 0.6);
        assert_eq!(config.preferred_probability, 0.4);
        assert_eq!(config.weight_floor, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            RotationConfig { boost_probability: 1.2, ..Default::default() },
            RotationConfig { preferred_probability: -0.1, ..Default::default() },
            RotationConfig { weight_floor: 0.0, ..Default::default() },
            RotationConfig { window_size: 0, ..Default::default() },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: RotationConfig = toml::from_str("window_size = 5").unwrap();
        assert_eq!(config.window_size, 5);
        assert_eq!(config.boost_probability, 0.6);
    }
}
