//! Error types for the settings crate.
//!
//! This module provides structured error types for loading, saving and
//! validating configuration files.

use garmentcad_core::GeometryError;
use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    /// A configuration validation error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to configuration validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A seam profile name is not defined.
    #[error("Unknown seam profile: {0}")]
    UnknownProfile(String),

    /// A configuration value is out of valid range.
    #[error("Value out of range for '{key}': {reason}")]
    ValueOutOfRange { key: String, reason: String },

    /// A tolerance section failed its own validation.
    #[error("Invalid tolerance in '{section}': {source}")]
    Tolerance {
        section: String,
        #[source]
        source: GeometryError,
    },
}

impl ConfigError {
    pub(crate) fn tolerance(section: impl Into<String>) -> impl FnOnce(GeometryError) -> Self {
        let section = section.into();
        move |source| ConfigError::Tolerance { section, source }
    }
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported config format: yaml");

        let err = ConfigError::ValueOutOfRange {
            key: "default_sheet_width_mm".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Value out of range for 'default_sheet_width_mm': must be positive"
        );

        let err = SettingsError::ConfigDirectory("no home".to_string());
        assert_eq!(err.to_string(), "Config directory error: no home");
    }

    #[test]
    fn test_error_conversion() {
        let err: SettingsError = ConfigError::UnknownProfile("denim".to_string()).into();
        assert!(matches!(err, SettingsError::Config(_)));

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: SettingsError = io_err.into();
        assert!(matches!(err, SettingsError::IoError(_)));

        let err = ConfigError::tolerance("geometry")(GeometryError::ZeroArea);
        assert!(err.to_string().starts_with("Invalid tolerance in 'geometry'"));
    }
}
