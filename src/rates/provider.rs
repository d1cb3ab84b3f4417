//! Exchange-rate provider abstraction
//!
//! Providers answer "how many units of `quote` for one unit of `base`".
//! They are called from the rate cache's creation function, so they are
//! synchronous and may block.

use crate::config::{Config, ProviderKind};
use crate::error::{RateError, RateResult};
use crate::rates::currency::CurrencyPair;
use crate::rates::http::HttpProvider;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Source of exchange rates
pub trait ExchangeRateProvider: Send + Sync {
    /// Short provider name, recorded on every quote
    fn name(&self) -> &str;

    /// Current rate for `pair`
    fn rate(&self, pair: &CurrencyPair) -> RateResult<f64>;
}

/// Reject rates that cannot be used for conversion
pub fn validate_rate(pair: &CurrencyPair, rate: f64) -> RateResult<f64> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(RateError::InvalidRate {
            pair: pair.to_string(),
            rate,
        })
    }
}

/// Provider backed by a fixed rate table
///
/// Pairs missing from the table are answered from their inverse when
/// possible.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    rates: HashMap<CurrencyPair, f64>,
}

impl StaticProvider {
    pub const NAME: &'static str = "static";

    /// Build from `"BASE/QUOTE" = rate` entries
    pub fn from_table(table: &BTreeMap<String, f64>) -> RateResult<Self> {
        let mut rates = HashMap::with_capacity(table.len());
        for (key, rate) in table {
            let pair = CurrencyPair::parse(key)?;
            rates.insert(pair, validate_rate(&pair, *rate)?);
        }
        Ok(Self { rates })
    }

    /// Add or replace a single rate
    pub fn with_rate(mut self, pair: CurrencyPair, rate: f64) -> RateResult<Self> {
        self.rates.insert(pair, validate_rate(&pair, rate)?);
        Ok(self)
    }
}

impl ExchangeRateProvider for StaticProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn rate(&self, pair: &CurrencyPair) -> RateResult<f64> {
        if pair.is_identity() {
            return Ok(1.0);
        }

        if let Some(rate) = self.rates.get(pair) {
            return Ok(*rate);
        }

        match self.rates.get(&pair.inverse()) {
            Some(inverse) => {
                debug!("Answering {} from inverse rate", pair);
                validate_rate(pair, 1.0 / inverse)
            }
            None => Err(RateError::RateUnavailable(*pair)),
        }
    }
}

/// Create the provider selected by the configuration
pub fn create_provider(config: &Config) -> RateResult<Arc<dyn ExchangeRateProvider>> {
    match config.provider.kind {
        ProviderKind::Static => Ok(Arc::new(StaticProvider::from_table(&config.rates)?)),
        ProviderKind::Http => Ok(Arc::new(HttpProvider::new(&config.provider)?)),
    }
}
