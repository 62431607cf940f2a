// SPDX-License-Identifier: MPL-2.0
//! This module handles the queue's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use toast_queue::config::{self, QueueConfig};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.default_expire_ms = Some(8000);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ToastQueue";

pub const DEFAULT_EXPIRE_MS: u64 = 5000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Automatic removal delay for notifications that do not request an
    /// explicit expiry, in milliseconds.
    #[serde(default)]
    pub default_expire_ms: Option<u64>,
    /// Whether hovering or focusing a notification pauses its expiry
    /// countdown. When disabled, `pause` calls are ignored.
    #[serde(default)]
    pub pause_on_hover: Option<bool>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            default_expire_ms: Some(DEFAULT_EXPIRE_MS),
            pause_on_hover: Some(true),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<QueueConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(QueueConfig::default())
}

pub fn save(config: &QueueConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<QueueConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &QueueConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_has_five_second_expiry() {
        let config = QueueConfig::default();
        assert_eq!(config.default_expire_ms, Some(DEFAULT_EXPIRE_MS));
        assert_eq!(config.pause_on_hover, Some(true));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let path = dir.path().join("settings.toml");

        let config = QueueConfig {
            default_expire_ms: Some(8000),
            pause_on_hover: Some(false),
        };
        save_to_path(&config, &path).expect("Failed to save config");

        let loaded = load_from_path(&path).expect("Failed to load config");
        assert_eq!(loaded.default_expire_ms, Some(8000));
        assert_eq!(loaded.pause_on_hover, Some(false));
    }

    #[test]
    fn load_from_missing_fields_falls_back_to_none() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "default_expire_ms = 3000\n").unwrap();

        let loaded = load_from_path(&path).expect("Failed to load config");
        assert_eq!(loaded.default_expire_ms, Some(3000));
        assert_eq!(loaded.pause_on_hover, None);
    }

    #[test]
    fn load_from_invalid_toml_falls_back_to_default() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "not valid toml [[[").unwrap();

        let loaded = load_from_path(&path).expect("load should not fail");
        assert_eq!(loaded.default_expire_ms, Some(DEFAULT_EXPIRE_MS));
    }
}
