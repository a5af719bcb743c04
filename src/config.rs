pub mod range_types;

use crate::game_logic::errors::{VanguardError, VanguardResult};
use crate::resources::GameConfig;
use bevy::prelude::*;
use std::fs;
use std::path::PathBuf;

fn get_config_path() -> VanguardResult<PathBuf> {
    let config_dir = dirs::config_dir().ok_or(VanguardError::ConfigDirNotFound)?;
    let app_config_dir = config_dir.join("vanguard");
    fs::create_dir_all(&app_config_dir)?;
    Ok(app_config_dir.join("config.toml"))
}

/// Load the config file, falling back to defaults when it does not exist
pub fn load_config() -> GameConfig {
    match try_load_config() {
        Ok(config) => {
            info!("Loaded configuration from disk");
            config
        }
        Err(VanguardError::ConfigFileNotFound { path }) => {
            info!("No config file at {path:?}; using defaults");
            GameConfig::default()
        }
        Err(err) => {
            warn!("Failed to load config ({err}); using defaults");
            GameConfig::default()
        }
    }
}

fn try_load_config() -> VanguardResult<GameConfig> {
    let path = get_config_path()?;
    if !path.exists() {
        return Err(VanguardError::ConfigFileNotFound { path });
    }
    let contents = fs::read_to_string(&path)?;
    Ok(toml::from_str(&contents)?)
}

/// Write the current config to disk
pub fn save_config(config: &GameConfig) -> VanguardResult<()> {
    let path = get_config_path()?;
    let contents = toml::to_string_pretty(config)?;
    fs::write(&path, contents)?;
    Ok(())
}
