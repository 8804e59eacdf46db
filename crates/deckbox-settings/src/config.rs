//! Configuration file handling for DeckBox
//!
//! A config holds the box parameters and the output settings. Files are JSON
//! or TOML, chosen by extension; missing keys fall back to their defaults.

use std::path::{Path, PathBuf};

use deckbox_camtools::{BoxParameters, GcodeSettings};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Output document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Vector drawing, one group per panel
    #[default]
    Svg,
    /// Laser cutting program
    Gcode,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Svg => write!(f, "svg"),
            Self::Gcode => write!(f, "gcode"),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Laser parameters, used when `format` is G-code
    pub gcode: GcodeSettings,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub deck_box: BoxParameters,
    pub output: OutputSettings,
}

enum FileFormat {
    Json,
    Toml,
}

fn file_format(path: &Path) -> SettingsResult<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("(none)").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `deckbox/config.toml` under the platform configuration directory.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory found".to_string())
            })?;
        path.push("deckbox");
        path.push("config.toml");
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = file_format(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match file_format(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.deck_box.validate()?;

        let gcode = &self.output.gcode;
        if gcode.laser_passes == 0 {
            return Err(SettingsError::invalid("laser_passes", "must be at least 1"));
        }

        if !gcode.feed_rate.is_finite() || gcode.feed_rate <= 0.0 {
            return Err(SettingsError::invalid("feed_rate", "must be > 0"));
        }

        if !gcode.z_step_down.is_finite() || gcode.z_step_down < 0.0 {
            return Err(SettingsError::invalid("z_step_down", "must not be negative"));
        }

        if !gcode.offset_x.is_finite() || !gcode.offset_y.is_finite() {
            return Err(SettingsError::invalid("offset", "must be finite"));
        }

        Ok(())
    }
}
