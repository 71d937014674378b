// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves layout sync and pane settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::ControlsPosition;

/// Debounce delay used when nothing else is configured
pub const DEFAULT_DEBOUNCE_DELAY_MS: i64 = 400;

/// Layout synchronization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Quiet period after the last metrics change before the layout is committed.
    /// Zero or negative commits on the next poll.
    pub debounce_delay_ms: i64,
    /// Push committed bounds to the workspace automatically
    pub auto_sync: bool,
}

impl SyncSettings {
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms.max(0) as u64)
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            debounce_delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
            auto_sync: true,
        }
    }
}

/// Pane header settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneSettings {
    /// Side of the title the control cluster is drawn on
    pub controls_position: ControlsPosition,
    /// Title shown in the demo pane header
    pub title: String,
}

impl Default for PaneSettings {
    fn default() -> Self {
        Self {
            controls_position: ControlsPosition::default(),
            title: "Workspace".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout synchronization settings
    pub sync: SyncSettings,

    /// Pane header settings
    pub pane: PaneSettings,

    /// Initial window dimensions
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync: SyncSettings::default(),
            pane: PaneSettings::default(),
            window_width: 1200,
            window_height: 800,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl Config {
    /// Get the default config file path (~/.config/adaptive-panes/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("adaptive-panes").join("config.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
