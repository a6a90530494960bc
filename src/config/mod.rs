//! Configuration for the veracity client.
//!
//! Read from `~/.config/veracity/config.toml` at startup. If the file
//! doesn't exist, a default configuration with comments is created.
//! Missing fields fall back to their defaults.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::app::VeracityError;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
}

/// Where and how to reach the mock REST backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Best-effort persistence of local (unsynced) comments.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Persist local comments across runs.
    pub enabled: bool,
    /// Override the cache file location; defaults to the platform data dir.
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mock-d-bnew.vercel.app/".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with
    /// comments. If it exists but is invalid, returns an error.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/veracity/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("veracity").join("config.toml"))
    }

    /// Resolve where local comments should be persisted, if anywhere.
    /// `None` means the cache is disabled and local comments are volatile.
    pub fn local_comment_path(&self) -> crate::app::Result<Option<PathBuf>> {
        if !self.cache.enabled {
            return Ok(None);
        }

        if let Some(path) = &self.cache.path {
            return Ok(Some(path.clone()));
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| VeracityError::Config("Could not find data directory".into()))?;
        let veracity_dir = data_dir.join("veracity");
        fs::create_dir_all(&veracity_dir)?;
        Ok(Some(veracity_dir.join("local_comments.json")))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Veracity Configuration

[api]
# Base URL of the mock news/comments backend
base_url = "https://mock-d-bnew.vercel.app/"

# Request timeout in seconds
timeout_secs = 10

[cache]
# Persist local (unsynced) comments across runs
enabled = true

# Override the cache file location (defaults to the platform data dir)
# path = "/tmp/veracity-local-comments.json"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
