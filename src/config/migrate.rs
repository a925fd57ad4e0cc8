//! Configuration file checks and in-place upgrades.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::Value;
use std::fs;

/// Keys a complete configuration file must carry.
const REQUIRED_KEYS: [&str; 4] = [
    "database",
    "location_provider",
    "coordinate_places",
    "show_pace",
];

/// Report config keys missing from the file on disk.
pub fn missing_keys() -> AppResult<Vec<String>> {
    let path = Config::config_file();
    if !path.exists() {
        return Err(AppError::ConfigLoad);
    }

    let content = fs::read_to_string(&path)?;
    let value: Value =
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    let mut missing = Vec::new();
    for key in REQUIRED_KEYS {
        if value.get(key).is_none() {
            missing.push(key.to_string());
        }
    }
    Ok(missing)
}

/// Fill any missing keys with their defaults and rewrite the file.
pub fn migrate_config() -> AppResult<()> {
    let missing = missing_keys()?;
    if missing.is_empty() {
        info("Configuration is up to date.");
        return Ok(());
    }

    // Re-parse through the typed Config: serde fills the defaults.
    let cfg = Config::load();
    let yaml = serde_yaml::to_string(&cfg).map_err(|_| AppError::ConfigSave)?;
    fs::write(Config::config_file(), yaml)?;

    success(format!(
        "Configuration migrated, added: {}",
        missing.join(", ")
    ));
    Ok(())
}
