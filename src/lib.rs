//! ratecache - cached currency conversion
//!
//! A bounded least-recently-used cache with lazy value creation, and an
//! exchange-rate quote cache built on top of it.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod rates;

pub use error::{CacheError, RateError, RateResult};
