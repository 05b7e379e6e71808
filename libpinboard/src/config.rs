//! Configuration management for the Pinboard client
//!
//! User preferences and logging settings live in a single TOML file:
//!
//! ```toml
//! [preferences]
//! auth_token = "user:0123456789ABCDEF"
//! preferred_details_view = "external_browser"
//! mark_as_read_on_open = true
//! default_tags = ["rust", "reading"]
//!
//! [logging]
//! format = "json"
//! level = "debug"
//! ```
//!
//! Every field is optional; a missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::logging::LogFormat;
use crate::types::{
    Appearance, EditAfterSharing, PeriodicSync, PreferredDateFormat, PreferredDetailsView,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preferences: PreferencesConfig,
    pub logging: LogConfig,
}

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    pub auth_token: Option<String>,
    pub appearance: Appearance,
    pub preferred_date_format: PreferredDateFormat,
    pub preferred_details_view: PreferredDetailsView,
    pub mark_as_read_on_open: bool,
    pub auto_fill_description: bool,
    pub show_description_in_lists: bool,
    pub default_private: bool,
    pub default_read_later: bool,
    pub edit_after_sharing: EditAfterSharing,
    pub default_tags: Vec<String>,
    pub periodic_sync: PeriodicSync,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            auth_token: None,
            appearance: Appearance::default(),
            preferred_date_format: PreferredDateFormat::default(),
            preferred_details_view: PreferredDetailsView::default(),
            mark_as_read_on_open: false,
            auto_fill_description: false,
            show_description_in_lists: true,
            default_private: false,
            default_read_later: false,
            edit_after_sharing: EditAfterSharing::default(),
            default_tags: Vec::new(),
            periodic_sync: PeriodicSync::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// Falls back to the defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Write configuration to a specific path, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::ReadError)?;
        }
        let content = toml::to_string_pretty(self).map_err(ConfigError::WriteError)?;
        std::fs::write(path, content).map_err(ConfigError::ReadError)?;
        Ok(())
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("PINBOARD_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("pinboard").join("config.toml"))
}
