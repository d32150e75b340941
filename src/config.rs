use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::format::{DisplayFormatter, DisplayLocale};
use crate::logging::LogConfig;
use crate::storage::WorkoutRepository;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where workout snapshots live
    pub storage: StorageSettings,

    /// Locale and time zone used for display
    pub display: DisplaySettings,

    /// Logging output
    pub logging: LogConfig,
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Data directory path
    pub data_dir: PathBuf,
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Locale used for labels and dates
    pub locale: DisplayLocale,

    /// Offset from UTC, in whole hours, used when rendering timestamps
    pub utc_offset_hours: i32,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: AppConfig::app_dir().join("data"),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            locale: DisplayLocale::Indonesian,
            utc_offset_hours: 7,
        }
    }
}

impl DisplaySettings {
    /// Formatter for these settings
    pub fn formatter(&self) -> crate::Result<DisplayFormatter> {
        DisplayFormatter::with_offset_hours(self.locale, self.utc_offset_hours)
    }
}

impl StorageSettings {
    /// Repository rooted at the configured data directory
    pub fn repository(&self) -> WorkoutRepository {
        WorkoutRepository::open_dir(&self.data_dir)
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Per-user application directory
    pub fn app_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".workoutlog")
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        Self::app_dir().join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(&Self::default_config_path())
    }

    // Runs before logging is set up, so problems go straight to stderr. A
    // missing file is the normal first-run case and stays quiet.
    fn load_or_default_from(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Config file {} not loaded, using defaults: {:#}",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
