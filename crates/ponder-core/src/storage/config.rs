//! Persisted reminder configuration.
//!
//! A flat JSON object rewritten wholesale on every mutation. Missing
//! fields fill in from defaults, so a config written by an older
//! version keeps loading.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// Scheduler and presentation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Reminder cadence in milliseconds. Must be positive.
    pub interval_ms: u64,
    /// Master switch for the interval timer.
    pub enabled: bool,
    pub theme: String,
    /// Surface opacity in [0, 1].
    pub opacity: f64,
    pub always_on_top: bool,
    pub center_position: bool,
    /// Auto-dismiss delay in milliseconds; 0 means never auto-dismiss.
    pub reminder_duration_ms: u64,
    /// Start the scheduler on process start.
    pub auto_start: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            interval_ms: 30 * 60 * 1000,
            enabled: true,
            theme: "default".to_string(),
            opacity: 0.95,
            always_on_top: true,
            center_position: true,
            reminder_duration_ms: 10_000,
            auto_start: true,
        }
    }
}

impl ReminderConfig {
    /// Load from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// parsed values are out of range.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, degrading to defaults on any failure.
    ///
    /// The failure is logged and the defaults are persisted
    /// immediately, so the next run finds a well-formed file.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if !matches!(&e, ConfigError::Io(io) if io.kind() == std::io::ErrorKind::NotFound)
                {
                    warn!(path = %path.display(), "cannot load config, using defaults: {e}");
                }
                let config = Self::default();
                if let Err(e) = config.save(path) {
                    warn!(path = %path.display(), "failed to persist default config: {e}");
                }
                config
            }
        }
    }

    /// Persist to `path`, rewriting the file wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get a config value as a string by field name.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a single field by name, parsing `value` according to the
    /// field's current type. Does not persist; callers decide when to
    /// write.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not
    /// parse, or the resulting config is out of range.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)?;
        let object = json
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = object
            .get(key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let parse_err = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| parse_err(e.to_string()))?,
            ),
            serde_json::Value::Number(n) if n.is_u64() => serde_json::Value::Number(
                value
                    .parse::<u64>()
                    .map_err(|e| parse_err(e.to_string()))?
                    .into(),
            ),
            serde_json::Value::Number(_) => {
                let parsed = value.parse::<f64>().map_err(|e| parse_err(e.to_string()))?;
                serde_json::Number::from_f64(parsed)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| parse_err(format!("cannot represent {value} as a number")))?
            }
            _ => serde_json::Value::String(value.to_string()),
        };

        object.insert(key.to_string(), new_value);
        let updated: Self = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "interval_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::InvalidValue {
                key: "opacity".to_string(),
                message: "must be within [0, 1]".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_shipped_values() {
        let config = ReminderConfig::default();
        assert_eq!(config.interval_ms, 1_800_000);
        assert!(config.enabled);
        assert_eq!(config.opacity, 0.95);
        assert_eq!(config.reminder_duration_ms, 10_000);
        assert!(config.auto_start);
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ReminderConfig::default();
        config.interval_ms = 60_000;
        config.theme = "dusk".to_string();
        config.save(&path).unwrap();

        assert_eq!(ReminderConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"interval_ms": 5000}"#).unwrap();

        let config = ReminderConfig::load(&path).unwrap();
        assert_eq!(config.interval_ms, 5000);
        assert_eq!(config.opacity, 0.95);
    }

    #[test]
    fn corrupt_file_degrades_to_persisted_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json at all").unwrap();

        let config = ReminderConfig::load_or_default(&path);
        assert_eq!(config, ReminderConfig::default());
        // The defaults were written back over the corrupt file.
        assert_eq!(ReminderConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn get_returns_string_for_all_field_types() {
        let config = ReminderConfig::default();
        assert_eq!(config.get("enabled").as_deref(), Some("true"));
        assert_eq!(config.get("interval_ms").as_deref(), Some("1800000"));
        assert_eq!(config.get("theme").as_deref(), Some("default"));
        assert!(config.get("no_such_key").is_none());
    }

    #[test]
    fn set_parses_by_field_type() {
        let mut config = ReminderConfig::default();
        config.set("enabled", "false").unwrap();
        assert!(!config.enabled);
        config.set("interval_ms", "90000").unwrap();
        assert_eq!(config.interval_ms, 90_000);
        config.set("opacity", "0.5").unwrap();
        assert_eq!(config.opacity, 0.5);
        config.set("theme", "dusk").unwrap();
        assert_eq!(config.theme, "dusk");
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut config = ReminderConfig::default();
        assert!(matches!(
            config.set("no_such_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(config.set("enabled", "maybe").is_err());
        assert!(config.set("interval_ms", "0").is_err());
        assert!(config.set("opacity", "1.5").is_err());
        // Failed sets leave the config untouched.
        assert_eq!(config, ReminderConfig::default());
    }
}
