//! TOML-based application preferences.
//!
//! Stores cross-session preferences:
//! - Break enforcement tunables (break length)
//! - Notification preferences
//! - Appearance settings for the presentation layer
//!
//! Stored at `~/.config/codelock/config.toml`. Session-level settings
//! (duration, deadline) never live here -- they are chosen at session start
//! and discarded at session end.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::session::MIN_BREAK_DURATION_SECS;

/// Break enforcement configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreaksConfig {
    /// Enforced break length in seconds. Values below 180 are floored when
    /// applied at session start.
    #[serde(default = "default_break_duration_secs")]
    pub break_duration_secs: u32,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_50")]
    pub volume: u32,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/codelock/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub breaks: BreaksConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

// Default functions
fn default_break_duration_secs() -> u32 {
    MIN_BREAK_DURATION_SECS
}
fn default_true() -> bool {
    true
}
fn default_50() -> u32 {
    50
}
fn default_dark_mode() -> bool {
    true
}
fn default_accent_color() -> String {
    "#3b82f6".into()
}

impl Default for BreaksConfig {
    fn default() -> Self {
        Self {
            break_duration_secs: default_break_duration_secs(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 50,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            accent_color: default_accent_color(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, std::io::Error> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Break length to apply at session start, with the 180-second floor.
    pub fn effective_break_duration_secs(&self) -> u32 {
        self.breaks.break_duration_secs.max(MIN_BREAK_DURATION_SECS)
    }
}
