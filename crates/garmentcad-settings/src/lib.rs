//! GarmentCAD Settings Crate
//!
//! Engine configuration files, per-style seam tolerance profiles and the
//! default config location.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{Config, ConfigFormat};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use manager::{default_config_path, SettingsManager};
