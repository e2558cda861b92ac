//! Configuration management for leadscout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/leadscout/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Multi-source search settings
    pub search: SearchConfig,
    /// Where source definitions live
    pub sources: SourcesConfig,
    /// Raw provider payload capture
    pub capture: CaptureConfig,
    /// Lead matching settings
    pub matching: MatchingConfig,
}

impl AppConfig {
    /// Load configuration from the default path, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `LEADSCOUT_MAX_CONCURRENT`: Override the per-round concurrency cap
    /// - `LEADSCOUT_LIMIT_PER_SOURCE`: Override the per-source result limit
    /// - `LEADSCOUT_CAPTURE_ENABLED`: Override raw capture (true/false)
    /// - `LEADSCOUT_SOURCES_PATH`: Override the source definitions path
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `LEADSCOUT_*` environment overrides in place.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LEADSCOUT_MAX_CONCURRENT") {
            if let Ok(max) = val.parse() {
                self.search.max_concurrent = max;
                tracing::debug!("Override search.max_concurrent from env: {}", max);
            }
        }

        if let Ok(val) = std::env::var("LEADSCOUT_LIMIT_PER_SOURCE") {
            if let Ok(limit) = val.parse() {
                self.search.limit_per_source = limit;
                tracing::debug!("Override search.limit_per_source from env: {}", limit);
            }
        }

        if let Ok(val) = std::env::var("LEADSCOUT_CAPTURE_ENABLED") {
            if let Ok(enabled) = val.parse() {
                self.capture.enabled = enabled;
                tracing::debug!("Override capture.enabled from env: {}", enabled);
            }
        }

        if let Ok(val) = std::env::var("LEADSCOUT_SOURCES_PATH") {
            if !val.trim().is_empty() {
                tracing::debug!("Override sources.definitions_path from env: {}", val);
                self.sources.definitions_path = PathBuf::from(val);
            }
        }
    }

    /// Check value constraints that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.search.max_concurrent == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.max_concurrent".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.matching.max_concurrent == 0 {
            return Err(ConfigError::InvalidValue {
                field: "matching.max_concurrent".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.search.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "search.timeout_secs".to_string(),
                reason: "must be positive when set".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to the default path.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/leadscout/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "leadscout", "leadscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/leadscout`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "leadscout", "leadscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// Multi-source search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum adapter calls in flight per round
    pub max_concurrent: usize,
    /// Result limit handed to each adapter
    pub limit_per_source: usize,
    /// Optional deadline for a whole round, in seconds
    pub timeout_secs: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            limit_per_source: 100,
            timeout_secs: None,
        }
    }
}

/// Source definition location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// A TOML source list, or a directory of them
    pub definitions_path: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            definitions_path: PathBuf::from("sources.toml"),
        }
    }
}

/// Raw provider payload capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Write raw payloads at all
    pub enabled: bool,
    /// Directory receiving one JSON file per adapter
    pub dir: PathBuf,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from("raw_data"),
        }
    }
}

/// Lead matching settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Model identifier recorded with every match result
    pub model_name: String,
    /// Prompt template version recorded with every match result
    pub prompt_version: String,
    /// Maximum matcher calls in flight
    pub max_concurrent: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            model_name: "gpt-3.5-turbo".to_string(),
            prompt_version: "v1.2".to_string(),
            max_concurrent: 4,
        }
    }
}
