//! Settings manager: owns the active config and its file location.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "garmentcad";
const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/garmentcad/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })
}

#[derive(Debug, Clone)]
pub struct SettingsManager {
    path: PathBuf,
    config: Config,
}

impl SettingsManager {
    /// Loads the config at `path`, falling back to defaults when the file
    /// does not exist yet. A file that exists but is invalid is an error.
    pub fn load_or_default(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let config = if path.exists() {
            Config::load_from_file(&path)?
        } else {
            info!(path = %path.display(), "no config file; using defaults");
            Config::default()
        };
        Ok(Self { path, config })
    }

    /// Manager bound to [`default_config_path`].
    pub fn from_default_location() -> SettingsResult<Self> {
        Self::load_or_default(default_config_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Validates and writes the config, creating parent directories.
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    warn!(dir = %parent.display(), error = %e, "cannot create config directory");
                    SettingsError::ConfigDirectory(e.to_string())
                })?;
            }
        }
        self.config.save_to_file(&self.path)
    }

    /// Re-reads the file, keeping the current config if it is missing.
    pub fn reload(&mut self) -> SettingsResult<()> {
        if self.path.exists() {
            self.config = Config::load_from_file(&self.path)?;
        }
        Ok(())
    }
}
