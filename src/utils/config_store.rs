//! ConfigStore - Local Configuration Storage

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppConfig;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;
use tracing::{error, info};

/// Config file name inside the platform config directory
pub const CONFIG_FILE: &str = "orca-fleet.toml";

/// Path of the application config file
pub fn config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE))
}

/// Load the application config from the platform config directory
pub fn load_app_config() -> Result<AppConfig> {
    load_config_from(&config_path()?)
}

/// Load a TOML config file
///
/// A missing file is created with defaults; an empty file yields defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let config = AppConfig::default();
        save_config_to(path, &config)?;
        info!(path = ?path, "Created default config file");
        return Ok(config);
    }

    info!(path = ?path, "Loading config file");
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        error!(error = %e, path = ?path, "Failed to parse config file");
        e
    })?;
    config.validate()?;
    Ok(config)
}

/// Save a TOML config file
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
