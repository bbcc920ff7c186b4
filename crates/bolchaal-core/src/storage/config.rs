//! TOML-based application configuration.
//!
//! Stores:
//! - Rotation tunables (trailing window, boost and preference odds, weight floor)
//! - Learner preferences (faith vocabulary, preferred lesson mode)
//!
//! Configuration is stored at `~/.config/bolchaal/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::data_dir;
use crate::error::{ConfigError, CoreError};
use crate::faith_terms::FaithTradition;
use crate::mode::ModeId;
use crate::rotation::RotationConfig;

/// Learner preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearnerConfig {
    #[serde(default)]
    pub faith: FaithTradition,
    /// Mode the learner asked for last time, honoured some of the time.
    #[serde(default)]
    pub preferred_mode: Option<ModeId>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/bolchaal/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub learner: LearnerConfig,
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // Optional fields show up as null; "none" clears them.
                    _ if value.eq_ignore_ascii_case("none") => serde_json::Value::Null,
                    _ => serde_json::Value::String(value.trim().to_ascii_lowercase()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed, holds out-of-range
    /// rotation tunables, or the defaults cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.rotation
                    .validate()
                    .map_err(|e| load_failed(e.to_string()))?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// into the field's type, or the result fails validation.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Config::apply`] fails or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.apply(key, value)?;
        self.save()?;
        Ok(())
    }

    /// # Errors
    /// Returns an error if the rotation tunables are out of range.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.rotation.validate()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("using default configuration: {e}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.rotation, RotationConfig::default());
        assert_eq!(parsed.learner.faith, FaithTradition::Hindu);
        assert!(parsed.learner.preferred_mode.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("rotation.window_size").as_deref(), Some("10"));
        assert_eq!(cfg.get("rotation.boost_probability").as_deref(), Some("0.6"));
        assert_eq!(cfg.get("learner.faith").as_deref(), Some("hindu"));
        assert_eq!(cfg.get("learner.preferred_mode").as_deref(), Some("null"));
        assert!(cfg.get("rotation.missing_key").is_none());
    }

    #[test]
    fn apply_updates_number() {
        let mut cfg = Config::default();
        cfg.apply("rotation.window_size", "5").unwrap();
        assert_eq!(cfg.rotation.window_size, 5);
        cfg.apply("rotation.boost_probability", "0.75").unwrap();
        assert_eq!(cfg.rotation.boost_probability, 0.75);
    }

    #[test]
    fn apply_updates_enums() {
        let mut cfg = Config::default();
        cfg.apply("learner.faith", "Muslim").unwrap();
        assert_eq!(cfg.learner.faith, FaithTradition::Muslim);
        cfg.apply("learner.preferred_mode", "flashcard").unwrap();
        assert_eq!(cfg.learner.preferred_mode, Some(ModeId::Flashcard));
        cfg.apply("learner.preferred_mode", "none").unwrap();
        assert!(cfg.learner.preferred_mode.is_none());
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.apply("rotation.nonexistent_key", "1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("rotation.window_size", "lots").is_err());
        assert!(cfg.apply("learner.faith", "jedi").is_err());
        assert_eq!(cfg.rotation.window_size, 10);
    }

    #[test]
    fn apply_rejects_out_of_range_probability() {
        let mut cfg = Config::default();
        let err = cfg.apply("rotation.boost_probability", "1.5").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(cfg.rotation.boost_probability, 0.6);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.rotation.window_size, 10);

        let mut changed = cfg;
        changed.apply("learner.faith", "christian").unwrap();
        changed.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.learner.faith, FaithTradition::Christian);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[rotation]\nwindow_size = 20\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.rotation.window_size, 20);
        assert_eq!(cfg.rotation.weight_floor, 0.1);
        assert_eq!(cfg.learner.faith, FaithTradition::Hindu);
    }

    #[test]
    fn load_from_rejects_out_of_range_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[rotation]\nboost_probability = 5.0\nwindow_size = 0\nweight_floor = -3.0\n",
        )
        .unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { .. }));
        assert!(err.to_string().contains("rotation.boost_probability"));

        std::fs::write(&path, "[rotation]\nwindow_size = 0\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("rotation.window_size"));
    }
}
