//! Configuration loading for ratecache
//!
//! Every setting has a default, so a missing file is not an error. Values
//! that parse but cannot be used are rejected here, where the error can
//! still name the file they came from.

pub mod schema;

pub use schema::{CacheConfig, Config, GeneralConfig, LogFormat, ProviderConfig, ProviderKind};

use crate::error::{RateError, RateResult};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file existed at the given path
    Defaults(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "Loaded config from {}", path.display()),
            Self::Defaults(path) => {
                write!(f, "No config at {}, using defaults", path.display())
            }
        }
    }
}

/// A parsed configuration and its origin
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Reads and writes the TOML config file
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager for the per-user config file
    pub fn new() -> Self {
        Self::with_path(Self::default_path())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<config dir>/ratecache/config.toml`, or `./ratecache/...` when the
    /// platform has no config dir
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ratecache")
            .join("config.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the config file, or defaults if there is none
    pub async fn load(&self) -> RateResult<LoadedConfig> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(LoadedConfig {
                config: Config::default(),
                source: ConfigSource::Defaults(self.path.clone()),
            });
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| RateError::io(format!("reading config from {}", self.path.display()), e))?;

        Ok(LoadedConfig {
            config: parse(&self.path, &content)?,
            source: ConfigSource::File(self.path.clone()),
        })
    }

    /// Write `config`, creating the parent directory if needed
    pub async fn save(&self, config: &Config) -> RateResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RateError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| RateError::io(format!("writing config to {}", self.path.display()), e))?;

        info!("Configuration saved to {}", self.path.display());
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and validate config text read from `path`
fn parse(path: &Path, content: &str) -> RateResult<Config> {
    let invalid = |reason: String| RateError::ConfigInvalid {
        path: path.to_path_buf(),
        reason,
    };

    let config: Config = toml::from_str(content).map_err(|e| invalid(e.message().to_string()))?;
    config.validate().map_err(invalid)?;
    Ok(config)
}
