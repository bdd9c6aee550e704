//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Streak thresholds
//! - Defaults for new CGPA subjects
//! - Display mode (screenshot mode)
//! - Keyboard shortcuts
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::cgpa::{Credits, Grade};
use crate::error::ConfigError;

/// Streak engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Streak length at which the indicator turns "hot".
    #[serde(default = "default_hot_threshold")]
    pub hot_threshold: u32,
    /// Largest gap between two add days that still counts as consecutive.
    #[serde(default = "default_yesterday_tolerance_hours")]
    pub yesterday_tolerance_hours: u32,
}

/// Defaults for new ledger rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CgpaConfig {
    #[serde(default)]
    pub default_credits: Credits,
    #[serde(default)]
    pub default_grade: Grade,
    #[serde(default = "default_semester")]
    pub default_semester: String,
}

/// UI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hide chrome for clean screenshots.
    #[serde(default)]
    pub screenshot_mode: bool,
}

/// Keyboard shortcuts configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortcutsConfig {
    /// Focuses the task input when typing outside a text field.
    #[serde(default = "default_focus_task_key")]
    pub focus_task_key: String,
    /// Runs a validated CGPA calculation. Written as `ctrl+<key>`.
    #[serde(default = "default_calculate_key")]
    pub calculate_key: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub streak: StreakConfig,
    #[serde(default)]
    pub cgpa: CgpaConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub shortcuts: ShortcutsConfig,
}

// Default functions
fn default_hot_threshold() -> u32 {
    5
}
fn default_yesterday_tolerance_hours() -> u32 {
    36
}
fn default_semester() -> String {
    "1".into()
}
fn default_focus_task_key() -> String {
    "/".into()
}
fn default_calculate_key() -> String {
    "ctrl+enter".into()
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            hot_threshold: default_hot_threshold(),
            yesterday_tolerance_hours: default_yesterday_tolerance_hours(),
        }
    }
}

impl Default for CgpaConfig {
    fn default() -> Self {
        Self {
            default_credits: Credits::default(),
            default_grade: Grade::default(),
            default_semester: default_semester(),
        }
    }
}

impl Default for ShortcutsConfig {
    fn default() -> Self {
        Self {
            focus_task_key: default_focus_task_key(),
            calculate_key: default_calculate_key(),
        }
    }
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a leaf value".to_string()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from an explicit path, writing defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
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

    /// Set a config value by key, in memory. Call [`Config::save_to`] to persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field (for example a credit weight other than 2, 3 or 4).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
