//! HTTP exchange-rate provider
//!
//! Talks to an exchangerate-api compatible pair endpoint:
//! `GET {base_url}/{api_key}/pair/{BASE}/{QUOTE}`. One request per call,
//! no retries.

use crate::config::ProviderConfig;
use crate::error::{RateError, RateResult};
use crate::rates::currency::CurrencyPair;
use crate::rates::provider::{validate_rate, ExchangeRateProvider};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Body of a pair conversion response
#[derive(Debug, Deserialize)]
struct PairResponse {
    result: String,

    conversion_rate: Option<f64>,

    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

/// Provider that fetches live rates over HTTP
pub struct HttpProvider {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl HttpProvider {
    pub const NAME: &'static str = "exchangerate-api";

    /// Create a provider, reading the API key from the configured variable
    pub fn new(config: &ProviderConfig) -> RateResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| RateError::ApiKeyMissing(config.api_key_env.clone()))?;

        Ok(Self::with_api_key(config, api_key))
    }

    /// Create a provider with an explicit API key
    pub fn with_api_key(config: &ProviderConfig, api_key: impl Into<String>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn pair_url(&self, pair: &CurrencyPair) -> String {
        format!(
            "{}/{}/pair/{}/{}",
            self.base_url, self.api_key, pair.base, pair.quote
        )
    }
}

/// Extract the conversion rate from a response body
fn parse_pair_response(pair: &CurrencyPair, body: &str) -> RateResult<f64> {
    let response: PairResponse = serde_json::from_str(body)
        .map_err(|e| RateError::response(HttpProvider::NAME, format!("malformed body: {}", e)))?;

    if response.result != "success" {
        let reason = response
            .error_type
            .unwrap_or_else(|| format!("result \"{}\"", response.result));
        return Err(RateError::response(HttpProvider::NAME, reason));
    }

    let rate = response
        .conversion_rate
        .ok_or_else(|| RateError::response(HttpProvider::NAME, "missing conversion_rate"))?;

    validate_rate(pair, rate)
}

impl ExchangeRateProvider for HttpProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn rate(&self, pair: &CurrencyPair) -> RateResult<f64> {
        if pair.is_identity() {
            return Ok(1.0);
        }

        // The key is part of the path, so only the pair is logged
        debug!("Requesting {} from {}", pair, Self::NAME);

        let mut response = self
            .agent
            .get(&self.pair_url(pair))
            .call()
            .map_err(|e| RateError::request(Self::NAME, e))?;

        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| RateError::request(Self::NAME, e))?;

        match parse_pair_response(pair, &body) {
            Err(RateError::ProviderResponse { .. }) if !status.is_success() => Err(
                RateError::response(Self::NAME, format!("HTTP status {}", status.as_u16())),
            ),
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn pair() -> CurrencyPair {
        CurrencyPair::parse("USD/EUR").unwrap()
    }

    #[test]
    fn parses_success_body() {
        let body = r#"{"result":"success","base_code":"USD","target_code":"EUR","conversion_rate":0.9213}"#;
        assert_eq!(parse_pair_response(&pair(), body).unwrap(), 0.9213);
    }

    #[test]
    fn reports_error_type() {
        let body = r#"{"result":"error","error-type":"invalid-key"}"#;
        let err = parse_pair_response(&pair(), body).unwrap_err();
        assert!(err.to_string().contains("invalid-key"));
    }

    #[test]
    fn rejects_missing_or_bad_rate() {
        let err = parse_pair_response(&pair(), r#"{"result":"success"}"#).unwrap_err();
        assert!(err.to_string().contains("missing conversion_rate"));

        let body = r#"{"result":"success","conversion_rate":-1.0}"#;
        let err = parse_pair_response(&pair(), body).unwrap_err();
        assert!(matches!(err, RateError::InvalidRate { .. }));

        let err = parse_pair_response(&pair(), "<html>").unwrap_err();
        assert!(matches!(err, RateError::ProviderResponse { .. }));
    }

    #[test]
    fn builds_pair_url() {
        let config = ProviderConfig {
            base_url: "https://rates.example.com/v6/".to_string(),
            ..ProviderConfig::default()
        };
        let provider = HttpProvider::with_api_key(&config, "k3y");
        assert_eq!(
            provider.pair_url(&pair()),
            "https://rates.example.com/v6/k3y/pair/USD/EUR"
        );
    }

    #[test]
    fn identity_pair_skips_request() {
        let config = ProviderConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ProviderConfig::default()
        };
        let provider = HttpProvider::with_api_key(&config, "unused");
        let pair = CurrencyPair::parse("EUR/EUR").unwrap();
        assert_eq!(provider.rate(&pair).unwrap(), 1.0);
    }

    #[test]
    #[serial]
    fn missing_api_key_is_reported() {
        let config = ProviderConfig {
            api_key_env: "RATECACHE_TEST_MISSING_KEY".to_string(),
            ..ProviderConfig::default()
        };
        std::env::remove_var(&config.api_key_env);

        let err = HttpProvider::new(&config).err().unwrap();
        assert!(matches!(err, RateError::ApiKeyMissing(var) if var == "RATECACHE_TEST_MISSING_KEY"));
    }

    #[test]
    #[serial]
    fn api_key_read_from_environment() {
        let config = ProviderConfig {
            api_key_env: "RATECACHE_TEST_PRESENT_KEY".to_string(),
            ..ProviderConfig::default()
        };
        std::env::set_var(&config.api_key_env, "  abc123 ");

        let provider = HttpProvider::new(&config).unwrap();
        assert_eq!(provider.api_key, "abc123");

        std::env::remove_var(&config.api_key_env);
    }
}
