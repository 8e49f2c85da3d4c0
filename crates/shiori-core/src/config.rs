use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ShioriError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub appearance: AppearanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    pub mode: ThemeMode,
}

/// Persisted appearance choice. `System` defers to the desktop;
/// toggling in-app always persists a concrete `Light` or `Dark`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl AppConfig {
    /// Load config: user file (if exists), otherwise built-in defaults.
    pub fn load() -> Result<Self, ShioriError> {
        let defaults: AppConfig =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| ShioriError::Config(e.to_string()))?;

        let user_path = Self::config_path();
        if user_path.exists() {
            tracing::debug!(path = %user_path.display(), "loading user config");
            let user_str =
                std::fs::read_to_string(&user_path).map_err(|e| ShioriError::Config(e.to_string()))?;
            let user: AppConfig =
                toml::from_str(&user_str).map_err(|e| ShioriError::Config(e.to_string()))?;
            Ok(user)
        } else {
            Ok(defaults)
        }
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), ShioriError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ShioriError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "shiori")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.appearance.mode, ThemeMode::System);
    }

    #[test]
    fn test_roundtrip() {
        let mut config = AppConfig::default();
        config.appearance.mode = ThemeMode::Dark;
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.appearance.mode, ThemeMode::Dark);
        assert_eq!(deserialized.server.base_url, config.server.base_url);
    }

    #[test]
    fn test_theme_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        let mode: ThemeMode = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(mode, ThemeMode::Dark);
    }
}
