//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::models::{PlateError, PlateSide, MAX_ROWS};

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "PICKLIST_VIEWER_CONFIG_DIR";

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!(
                "Invalid theme mode '{other}' (expected auto, dark, or light)"
            )),
        }
    }
}

/// Plate dimensions for the source and destination plates.
///
/// Defaults describe a 384-well plate (16 × 24) on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateConfig {
    /// Source plate rows
    pub source_rows: usize,
    /// Source plate columns
    pub source_cols: usize,
    /// Destination plate rows
    pub dest_rows: usize,
    /// Destination plate columns
    pub dest_cols: usize,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            source_rows: 16,
            source_cols: 24,
            dest_rows: 16,
            dest_cols: 24,
        }
    }
}

impl PlateConfig {
    /// (rows, cols) for one side.
    #[must_use]
    pub const fn dimensions(&self, side: PlateSide) -> (usize, usize) {
        match side {
            PlateSide::Source => (self.source_rows, self.source_cols),
            PlateSide::Destination => (self.dest_rows, self.dest_cols),
        }
    }
}

/// Maximum acceptable aggregated volume per well, in nanoliters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CeilingConfig {
    /// Source well ceiling
    pub source_nl: f64,
    /// Destination well ceiling
    pub dest_nl: f64,
}

impl Default for CeilingConfig {
    fn default() -> Self {
        Self {
            source_nl: 25_000.0,
            dest_nl: 50_000.0,
        }
    }
}

impl CeilingConfig {
    /// Ceiling for one side.
    #[must_use]
    pub const fn for_side(&self, side: PlateSide) -> f64 {
        match side {
            PlateSide::Source => self.source_nl,
            PlateSide::Destination => self.dest_nl,
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Picklist opened most recently (offered when no file is given)
    #[serde(default)]
    pub last_picklist: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/PicklistViewer/config.toml`
/// - macOS: `~/Library/Application Support/PicklistViewer/config.toml`
/// - Windows: `%APPDATA%\PicklistViewer\config.toml`
///
/// `PICKLIST_VIEWER_CONFIG_DIR` overrides the directory.
///
/// # Validation
///
/// - every plate dimension is at least 1
/// - plate rows do not exceed 52 (the row-letter limit)
/// - ceilings are finite and non-negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Plate dimensions
    #[serde(default)]
    pub plates: PlateConfig,
    /// Per-well volume ceilings
    #[serde(default)]
    pub ceilings: CeilingConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("PicklistViewer");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
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

        config.validate().context(format!(
            "Invalid config file: {}",
            config_path.display()
        ))?;

        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        tracing::info!(path = %config_path.display(), "saved config");
        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        for side in [PlateSide::Source, PlateSide::Destination] {
            let (rows, cols) = self.plates.dimensions(side);
            validate_dimensions(side, rows, cols)?;

            let ceiling = self.ceilings.for_side(side);
            if !ceiling.is_finite() || ceiling < 0.0 {
                anyhow::bail!(
                    "{} well ceiling must be a non-negative number, got {ceiling}",
                    side.label()
                );
            }
        }

        Ok(())
    }
}

/// Checks one plate's dimensions against the addressable range.
pub fn validate_dimensions(side: PlateSide, rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        anyhow::bail!(
            "{} plate dimensions must be positive, got {rows}x{cols}",
            side.label()
        );
    }
    if rows > MAX_ROWS {
        return Err(anyhow::Error::new(PlateError::UnsupportedRowCount { rows })
            .context(format!("{} plate has too many rows", side.label())));
    }
    Ok(())
}
