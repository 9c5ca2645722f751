//! File System Utilities
//!
//! Configuration and data directory management.

use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "orca-trucks", APP_NAME).ok_or(Error::ConfigDir {})
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/orca-fleet/` or `$XDG_CONFIG_HOME/orca-fleet/`
/// - **macOS**: `~/Library/Application Support/com.orca-trucks.orca-fleet/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\orca-trucks\orca-fleet\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let config_dir = dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// Get or create the data directory (log files)
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/orca-fleet/`
/// - **macOS**: `~/Library/Application Support/com.orca-trucks.orca-fleet/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\orca-trucks\orca-fleet\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();

    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }

    Ok(data_dir.to_path_buf())
}

