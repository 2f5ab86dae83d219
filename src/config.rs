//! Configuration management for the application.
//!
//! This module handles loading and validating application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{APP_DIR_NAME, CONFIG_DIR_ENV};
use crate::models::{BoardRect, Size};
use crate::services::audio::DEFAULT_MAX_UPLOAD_BYTES;
use crate::services::PositionEngine;

/// Durable store location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding the key-value store (defaults to `<config dir>/store`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Board geometry and drag behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Board content width in pixels
    pub width: f64,
    /// Board content height in pixels
    pub height: f64,
    /// Button bounding box width in pixels
    pub button_width: f64,
    /// Button bounding box height in pixels
    pub button_height: f64,
    /// Snap grid unit in pixels
    pub grid_size: f64,
    /// Snap to the grid while dragging (Shift still gives free placement)
    #[serde(default = "default_snap_enabled")]
    pub snap_enabled: bool,
}

const fn default_snap_enabled() -> bool {
    true
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            button_width: 64.0,
            button_height: 64.0,
            grid_size: 8.0,
            snap_enabled: true,
        }
    }
}

impl BoardConfig {
    /// Placement engine for this geometry.
    #[must_use]
    pub const fn engine(&self) -> PositionEngine {
        PositionEngine::new(
            BoardRect::new(self.width, self.height),
            Size::new(self.button_width, self.button_height),
            self.grid_size,
        )
    }
}

/// Autosave timer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Interval between unconditional saves, in milliseconds
    pub interval_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self { interval_ms: 30_000 }
    }
}

impl AutosaveConfig {
    /// The interval as a duration.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Audio upload limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted audio file in bytes
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Soundboard/config.toml`
/// - macOS: `~/Library/Application Support/Soundboard/config.toml`
/// - Windows: `%APPDATA%\Soundboard\config.toml`
///
/// `SOUNDBOARD_CONFIG_DIR` replaces the whole directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Durable store settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Board geometry
    #[serde(default)]
    pub board: BoardConfig,
    /// Autosave settings
    #[serde(default)]
    pub autosave: AutosaveConfig,
    /// Upload limits
    #[serde(default)]
    pub upload: UploadConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// - Linux: `~/.config/Soundboard/`
    /// - macOS: `~/Library/Application Support/Soundboard/`
    /// - Windows: `%APPDATA%\Soundboard\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory of the durable store, resolved against the config directory.
    pub fn store_dir(&self) -> Result<PathBuf> {
        match &self.storage.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("store")),
        }
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;

        Ok(config)
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - board and button dimensions are positive
    /// - grid size is positive
    /// - autosave interval is non-zero
    pub fn validate(&self) -> Result<()> {
        let board = &self.board;
        for (label, value) in [
            ("board.width", board.width),
            ("board.height", board.height),
            ("board.button_width", board.button_width),
            ("board.button_height", board.button_height),
            ("board.grid_size", board.grid_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                anyhow::bail!("{label} must be a positive number (got {value})");
            }
        }

        if self.autosave.interval_ms == 0 {
            anyhow::bail!("autosave.interval_ms must be greater than zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.storage.dir, None);
        assert!((config.board.width - 800.0).abs() < f64::EPSILON);
        assert!((config.board.grid_size - 8.0).abs() < f64::EPSILON);
        assert!(config.board.snap_enabled);
        assert_eq!(config.autosave.interval(), Duration::from_secs(30));
        assert_eq!(config.upload.max_bytes, 15_000 * 1024);
    }

    #[test]
    fn test_config_validate() {
        let config = Config::new();
        assert!(config.validate().is_ok());

        let mut config = Config::new();
        config.board.button_width = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.board.grid_size = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.autosave.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let mut config = Config::new();
        config.storage.dir = Some(PathBuf::from("/tmp/sb"));
        config.board.snap_enabled = false;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("[autosave]\ninterval_ms = 5000\n").unwrap();
        assert_eq!(parsed.autosave.interval_ms, 5000);
        assert_eq!(parsed.board, BoardConfig::default());
    }

    #[test]
    fn test_engine_from_board() {
        let engine = Config::new().board.engine();
        assert_eq!(engine.board(), BoardRect::new(800.0, 600.0));
        assert_eq!(engine.button_size(), Size::new(64.0, 64.0));
    }
}
