//! Exchange-rate quote cache
//!
//! An [`LruCache`] keyed by currency pair whose creation function asks an
//! [`ExchangeRateProvider`] for the rate. Quotes older than the configured
//! maximum age are refreshed in place on the next hit.

use crate::cache::{Creator, LruCache};
use crate::config::Config;
use crate::error::{RateError, RateResult};
use crate::rates::currency::CurrencyPair;
use crate::rates::provider::ExchangeRateProvider;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A rate as returned by a provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateQuote {
    pub pair: CurrencyPair,

    /// Units of `pair.quote` per one unit of `pair.base`
    pub rate: f64,

    /// Provider that produced the rate
    pub provider: String,

    pub fetched_at: DateTime<Utc>,
}

impl RateQuote {
    /// Whether the quote is at least `max_age` old at `now`
    pub fn is_stale(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        (now - self.fetched_at)
            .to_std()
            .map(|age| age >= max_age)
            .unwrap_or(false)
    }
}

/// Result of converting an amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub converted: f64,
    pub quote: RateQuote,
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    /// Lookups that had to ask the provider
    pub misses: u64,
    pub refreshes: u64,
    pub len: usize,
    pub capacity: usize,
}

/// Bounded cache of exchange-rate quotes
pub struct RateCache {
    quotes: LruCache<CurrencyPair, RateQuote, Creator<CurrencyPair, RateQuote, RateError>>,
    provider_name: String,
    max_age: Option<Duration>,
    hits: u64,
    misses: u64,
    refreshes: u64,
}

impl RateCache {
    /// Create a cache holding up to `capacity` pairs
    pub fn new(provider: Arc<dyn ExchangeRateProvider>, capacity: usize) -> RateResult<Self> {
        let provider_name = provider.name().to_string();
        let create: Creator<CurrencyPair, RateQuote, RateError> =
            Box::new(move |pair: &CurrencyPair| {
                let rate = provider.rate(pair)?;
                Ok(RateQuote {
                    pair: *pair,
                    rate,
                    provider: provider.name().to_string(),
                    fetched_at: Utc::now(),
                })
            });

        Ok(Self {
            quotes: LruCache::new(capacity, create)?,
            provider_name,
            max_age: None,
            hits: 0,
            misses: 0,
            refreshes: 0,
        })
    }

    /// Create a cache sized and aged from the `[cache]` section
    pub fn from_config(config: &Config, provider: Arc<dyn ExchangeRateProvider>) -> RateResult<Self> {
        let max_age = match config.cache.max_age_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Ok(Self::new(provider, config.cache.capacity)?.with_max_age(max_age))
    }

    /// Refresh quotes on hit once they reach `max_age`
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    /// Quote for `pair`, fetched on a miss and refreshed when stale
    pub fn quote(&mut self, pair: &CurrencyPair) -> RateResult<RateQuote> {
        let cached = self.quotes.contains(pair);
        let quote = self.quotes.retrieve(pair)?;

        if !cached {
            self.misses += 1;
            debug!("Cache miss for {}, fetched from {}", pair, self.provider_name);
            return Ok(quote);
        }

        self.hits += 1;
        match self.max_age {
            Some(max_age) if quote.is_stale(max_age, Utc::now()) => {
                debug!("Cached quote for {} is stale", pair);
                self.refresh(pair)?;
                self.quotes
                    .peek(pair)
                    .cloned()
                    .ok_or_else(|| RateError::Internal(format!("{} vanished on refresh", pair)))
            }
            _ => {
                debug!("Cache hit for {}", pair);
                Ok(quote)
            }
        }
    }

    /// Convert `amount` of `pair.base` into `pair.quote`
    pub fn convert(&mut self, amount: f64, pair: &CurrencyPair) -> RateResult<Conversion> {
        if !amount.is_finite() {
            return Err(RateError::InvalidAmount(amount.to_string()));
        }

        let quote = self.quote(pair)?;
        let converted = amount * quote.rate;
        if !converted.is_finite() {
            return Err(RateError::InvalidAmount(format!(
                "{} {} overflows when converted to {}",
                amount, pair.base, pair.quote
            )));
        }

        Ok(Conversion {
            amount,
            converted,
            quote,
        })
    }

    /// Re-fetch a cached pair without changing its recency
    ///
    /// Pairs that are not cached are left alone.
    pub fn refresh(&mut self, pair: &CurrencyPair) -> RateResult<()> {
        if !self.quotes.contains(pair) {
            debug!("Refresh of uncached {} ignored", pair);
            return Ok(());
        }

        self.quotes.refresh(pair)?;
        self.refreshes += 1;
        debug!("Refreshed {}", pair);
        Ok(())
    }

    /// Cached quotes from most to least recently used
    pub fn quotes(&self) -> impl Iterator<Item = &RateQuote> {
        self.quotes.iter().map(|(_, quote)| quote)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            refreshes: self.refreshes,
            len: self.quotes.len(),
            capacity: self.quotes.capacity(),
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}
