//! Exchange rates: currency model, providers and the quote cache

pub mod cache;
pub mod currency;
pub mod http;
pub mod provider;

pub use cache::{CacheStats, Conversion, RateCache, RateQuote};
pub use currency::{CurrencyCode, CurrencyPair};
pub use http::HttpProvider;
pub use provider::{create_provider, ExchangeRateProvider, StaticProvider};
