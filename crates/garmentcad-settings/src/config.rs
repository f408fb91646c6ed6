//! Configuration management for GarmentCAD
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Geometry tolerances (flattening, coincidence, snapping)
//! - Seam tolerance: the default profile plus named per-style profiles
//! - Nesting (piece spacing, rotation sampling, default sheet width)
//! - Display measurement system

pub use garmentcad_core::MeasurementSystem;
use garmentcad_core::{GeometryTolerance, NestingSettings, SeamTolerance};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult, SettingsResult};

/// Default cutting table width
pub const DEFAULT_SHEET_WIDTH_MM: f64 = 1500.0;

/// On-disk config format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display units for typed measurements
    pub measurement_system: MeasurementSystem,
    /// Sheet width used when a nesting job does not give one
    pub default_sheet_width_mm: f64,
    /// Geometry tolerances
    pub geometry: GeometryTolerance,
    /// Seam thresholds used when no profile is named
    pub seam: SeamTolerance,
    /// Nesting tuning
    pub nesting: NestingSettings,
    /// Per-style seam thresholds, keyed by profile name
    pub seam_profiles: HashMap<String, SeamTolerance>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            measurement_system: MeasurementSystem::default(),
            default_sheet_width_mm: DEFAULT_SHEET_WIDTH_MM,
            geometry: GeometryTolerance::default(),
            seam: SeamTolerance::default(),
            nesting: NestingSettings::default(),
            seam_profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Config = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.geometry
            .validate()
            .map_err(ConfigError::tolerance("geometry"))?;
        self.seam.validate().map_err(ConfigError::tolerance("seam"))?;
        self.nesting
            .validate()
            .map_err(ConfigError::tolerance("nesting"))?;

        if !self.default_sheet_width_mm.is_finite() || self.default_sheet_width_mm <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "default_sheet_width_mm".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        for (name, profile) in &self.seam_profiles {
            profile
                .validate()
                .map_err(ConfigError::tolerance(format!("seam_profiles.{name}")))?;
        }
        Ok(())
    }

    /// Seam thresholds for `profile`, or the default when `None`
    pub fn seam_tolerance(&self, profile: Option<&str>) -> ConfigResult<SeamTolerance> {
        match profile {
            None => Ok(self.seam),
            Some(name) => self
                .seam_profiles
                .get(name)
                .copied()
                .ok_or_else(|| ConfigError::UnknownProfile(name.to_string())),
        }
    }

    /// Add or replace a named seam profile
    pub fn set_seam_profile(
        &mut self,
        name: impl Into<String>,
        tolerance: SeamTolerance,
    ) -> ConfigResult<()> {
        let name = name.into();
        tolerance
            .validate()
            .map_err(ConfigError::tolerance(format!("seam_profiles.{name}")))?;
        self.seam_profiles.insert(name, tolerance);
        Ok(())
    }
}
