//! Currency codes and pairs

use crate::cache::CacheName;
use crate::error::{RateError, RateResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-letter currency code, always uppercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// Parse a currency code, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> RateResult<Self> {
        let trimmed = input.trim();
        match trimmed.as_bytes() {
            [a, b, c] if trimmed.bytes().all(|ch| ch.is_ascii_alphabetic()) => Ok(Self([
                a.to_ascii_uppercase(),
                b.to_ascii_uppercase(),
                c.to_ascii_uppercase(),
            ])),
            _ => Err(RateError::InvalidCurrency(input.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Ordered currency pair; a rate for `USD/EUR` is EUR per one USD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub quote: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(base: CurrencyCode, quote: CurrencyCode) -> Self {
        Self { base, quote }
    }

    /// Parse `USD/EUR`, `USD-EUR` or `USDEUR`
    pub fn parse(input: &str) -> RateResult<Self> {
        let trimmed = input.trim();
        let invalid = || RateError::InvalidPair(input.to_string());

        let (base, quote) = match trimmed.split_once(['/', '-']) {
            Some(parts) => parts,
            None if trimmed.len() == 6 && trimmed.is_ascii() => trimmed.split_at(3),
            None => return Err(invalid()),
        };

        let base = CurrencyCode::parse(base).map_err(|_| invalid())?;
        let quote = CurrencyCode::parse(quote).map_err(|_| invalid())?;
        Ok(Self::new(base, quote))
    }

    /// The same pair in the opposite direction
    pub fn inverse(&self) -> Self {
        Self::new(self.quote, self.base)
    }

    /// Whether both sides are the same currency
    pub fn is_identity(&self) -> bool {
        self.base == self.quote
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Codes are validated on construction, so every pair is a usable name.
impl CacheName for CurrencyPair {}
