//! Error types for ratecache
//!
//! The LRU core raises only [`CacheError`]; everything above it uses
//! `RateResult<T>` as its return type.

use crate::rates::CurrencyPair;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ratecache operations
pub type RateResult<T> = Result<T, RateError>;

/// Errors raised by the bounded recency cache itself
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    #[error(
        "Invalid cache capacity {0}: must be between {min} and {max}",
        min = crate::cache::MINIMUM_CAPACITY,
        max = crate::cache::MAXIMUM_CAPACITY
    )]
    InvalidCapacity(usize),

    #[error("Cache lookup with an empty name")]
    NullName,
}

/// All errors that can occur in ratecache
#[derive(Error, Debug)]
pub enum RateError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    // Input errors
    #[error("Invalid currency code: {0:?} (expected three letters, e.g. USD)")]
    InvalidCurrency(String),

    #[error("Invalid currency pair: {0:?} (expected BASE/QUOTE, e.g. USD/EUR)")]
    InvalidPair(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Batch line {line}: {reason}")]
    BatchLine { line: usize, reason: String },

    #[error("{failed} of {total} batch requests failed")]
    BatchFailed { failed: usize, total: usize },

    // Provider errors
    #[error("Invalid rate {rate} for {pair}")]
    InvalidRate { pair: String, rate: f64 },

    #[error("No exchange rate available for {0}")]
    RateUnavailable(CurrencyPair),

    #[error("API key not set: environment variable {0} is missing or empty")]
    ApiKeyMissing(String),

    #[error("Request to {provider} failed: {reason}")]
    ProviderRequest { provider: String, reason: String },

    #[error("Unexpected response from {provider}: {reason}")]
    ProviderResponse { provider: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RateError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a provider request error
    pub fn request(provider: impl Into<String>, reason: impl ToString) -> Self {
        Self::ProviderRequest {
            provider: provider.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a provider response error
    pub fn response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProviderResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::ApiKeyMissing(var) => Some(format!("Run: export {}=<your key>", var)),
            Self::Cache(CacheError::InvalidCapacity(_)) => {
                Some("Set cache.capacity in the config or pass --capacity".to_string())
            }
            Self::RateUnavailable(pair) => Some(format!(
                "Add \"{}\" to the [rates] table or switch provider.kind to \"http\"",
                pair
            )),
            Self::ProviderRequest { .. } => {
                Some("Check your network connection and provider.base_url".to_string())
            }
            _ => None,
        }
    }
}
