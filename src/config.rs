//! Persisted application preferences for the GUI shell
//!
//! The merger core holds no state between invocations; everything here is
//! presentation preference (theme, window geometry, last used directory).
//! Stored as JSON under the user config dir, load-or-default on startup,
//! saved on exit.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::gui::theme::Theme;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    /// Directory of the last file opened or saved, used to prefill the
    /// path prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_dir: Option<PathBuf>,
}

// Default value functions
fn default_window_width() -> f32 {
    1200.0
}

fn default_window_height() -> f32 {
    800.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            last_dir: None,
        }
    }
}

impl AppConfig {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load configuration from disk, falling back to defaults on any
    /// failure (a broken config file must never stop the app)
    pub fn load() -> Self {
        let config_path = Self::path();

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let loaded = fs::read_to_string(&config_path)
            .map_err(anyhow::Error::from)
            .and_then(|contents| {
                serde_json::from_str::<AppConfig>(&contents).map_err(anyhow::Error::from)
            });

        match loaded {
            Ok(config) => {
                info!("Loaded config from {:?}", config_path);
                config
            }
            Err(err) => {
                warn!(error = ?err, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Save configuration to the config file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        info!("Saved config to {:?}", config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.window_width, 1200.0);
        assert_eq!(config.window_height, 800.0);
        assert_eq!(config.last_dir, None);
    }

    #[test]
    fn test_json_round_trip() {
        let config = AppConfig {
            theme: Theme::Dark,
            window_width: 900.0,
            window_height: 650.0,
            last_dir: Some(PathBuf::from("/tmp/settings")),
        };

        let text = serde_json::to_string_pretty(&config).unwrap();
        let reloaded: AppConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded.theme, Theme::Dark);
        assert_eq!(reloaded.window_width, 900.0);
        assert_eq!(reloaded.last_dir, Some(PathBuf::from("/tmp/settings")));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        // Older or hand-edited config files may lack fields
        let config: AppConfig = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.window_width, 1200.0);
        assert_eq!(config.last_dir, None);
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.window_height, 800.0);
    }
}
