//! Configuration loading and management for educafoco.
//!
//! Loads settings from `educafoco.toml` with environment variable overrides for the API key.
//! A missing config file is not an error; built-in defaults apply.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name looked up in the current directory and `~/.config/educafoco/`
pub const CONFIG_FILE: &str = "educafoco.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing API key: set GEMINI_API_KEY or [api].gemini_key")]
    MissingApiKey,
}

/// Search model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model identifier (e.g., "gemini-3-flash-preview")
    pub model: String,
    /// Base URL of the Generative Language REST API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// API keys configuration (usually loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub gemini_key: Option<String>,
}

/// Storage paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the log file written in dashboard mode
    pub path: PathBuf,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the default location (educafoco.toml in cwd or home)
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::read_file(&path)?,
            None => {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                Config::default()
            }
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;
        config.apply_env();
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Override the API key from environment variables
    fn apply_env(&mut self) {
        for var in ["GEMINI_API_KEY", "API_KEY"] {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    self.api.gemini_key = Some(key);
                    return;
                }
            }
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("educafoco")
            .join(CONFIG_FILE);
        home_config.exists().then_some(home_config)
    }

    /// Get the Gemini API key
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api
            .gemini_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Path of the log file used while the dashboard owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.storage.path.join("educafoco.log")
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 90,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let path = dirs::data_local_dir()
            .map(|d| d.join("educafoco"))
            .unwrap_or_else(|| PathBuf::from("./data"));
        Self { path }
    }
}
