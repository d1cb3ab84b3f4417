//! Configuration schema for ratecache
//!
//! Configuration is stored at `~/.config/ratecache/config.toml`

use crate::cache::{MAXIMUM_CAPACITY, MINIMUM_CAPACITY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Quote cache settings
    pub cache: CacheConfig,

    /// Exchange-rate provider settings
    pub provider: ProviderConfig,

    /// Fixed rates for the static provider, keyed by pair (`"USD/EUR" = 0.92`)
    pub rates: BTreeMap<String, f64>,
}

impl Config {
    /// Check settings that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<(), String> {
        if !(MINIMUM_CAPACITY..=MAXIMUM_CAPACITY).contains(&self.cache.capacity) {
            return Err(format!(
                "cache.capacity = {} is outside {}..={}",
                self.cache.capacity, MINIMUM_CAPACITY, MAXIMUM_CAPACITY
            ));
        }
        if self.provider.timeout_secs == 0 {
            return Err("provider.timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

/// General application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_format: LogFormat,
}

/// Formatter used for log lines on stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Quote cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Number of currency pairs kept (4 to 128)
    pub capacity: usize,

    /// Refresh cached quotes older than N seconds (0 = never)
    pub max_age_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 16,
            max_age_secs: 0,
        }
    }
}

/// Which provider answers rate requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// exchangerate-api compatible HTTP endpoint
    #[default]
    Http,
    /// Rates from the `[rates]` table
    Static,
}

/// Exchange-rate provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,

    /// Base URL of the HTTP API
    pub base_url: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Http,
            base_url: "https://v6.exchangerate-api.com/v6".to_string(),
            api_key_env: "EXCHANGE_RATE_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}
