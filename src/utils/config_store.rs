//! ConfigStore - Local Configuration Storage

use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::CONFIG_FILE_NAME;
use crate::domain::config::DashboardConfig;
use crate::error::{Error, Result};

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/feeder-view/` or `$XDG_CONFIG_HOME/feeder-view/`
/// - **macOS**: `~/Library/Application Support/org.feeder.feeder-view/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\feeder\feeder-view\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let Some(project_dirs) = ProjectDirs::from("org", "feeder", "feeder-view") else {
        return Err(Error::Invalid {
            message: "Could not determine project directories".to_string(),
        });
    };

    let config_dir = project_dirs.config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// Path of the dashboard config file
pub fn config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the dashboard config from the platform config directory
pub fn load_config() -> Result<DashboardConfig> {
    load_config_from(&config_path()?)
}

/// Load a dashboard config from `path`, writing defaults if it does not exist
pub fn load_config_from(path: &Path) -> Result<DashboardConfig> {
    if !path.exists() {
        let config = DashboardConfig::default();
        save_config_to(path, &config)?;
        info!("Wrote default config to {}", path.display());
        return Ok(config);
    }

    let content = fs::read_to_string(path)?;
    DashboardConfig::from_toml_str(&content)
}

/// Save the dashboard config to the platform config directory
pub fn save_config(config: &DashboardConfig) -> Result<()> {
    save_config_to(&config_path()?, config)
}

/// Save a dashboard config to `path`
pub fn save_config_to(path: &Path, config: &DashboardConfig) -> Result<()> {
    config.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, config.to_toml_string()?)?;
    Ok(())
}
