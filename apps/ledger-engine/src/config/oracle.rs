//! Price oracle configuration.

use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::infrastructure::price_oracle::YahooOracleConfig;
use crate::infrastructure::price_oracle::yahoo::{
    DEFAULT_BASE_URL, DEFAULT_TICKER_SUFFIX, DEFAULT_USER_AGENT,
};

/// Which oracle implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleProvider {
    /// Yahoo Finance chart API.
    #[default]
    Yahoo,
    /// Fixed price table from `prices`.
    Static,
}

/// Price oracle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Oracle implementation.
    #[serde(default)]
    pub provider: OracleProvider,
    /// Yahoo API host.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Suffix appended to tickers for Yahoo.
    #[serde(default = "default_ticker_suffix")]
    pub ticker_suffix: String,
    /// User-Agent sent to Yahoo.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-lookup timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Whole-batch timeout in milliseconds.
    #[serde(default = "default_batch_timeout_ms")]
    pub batch_timeout_ms: u64,
    /// Price table for the static provider.
    #[serde(default)]
    pub prices: HashMap<String, Decimal>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: OracleProvider::default(),
            base_url: default_base_url(),
            ticker_suffix: default_ticker_suffix(),
            user_agent: default_user_agent(),
            request_timeout_ms: default_request_timeout_ms(),
            batch_timeout_ms: default_batch_timeout_ms(),
            prices: HashMap::new(),
        }
    }
}

impl OracleConfig {
    /// Per-lookup timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Whole-batch timeout.
    #[must_use]
    pub const fn batch_timeout(&self) -> Duration {
        Duration::from_millis(self.batch_timeout_ms)
    }

    /// Settings for the Yahoo adapter.
    #[must_use]
    pub fn yahoo(&self) -> YahooOracleConfig {
        YahooOracleConfig {
            base_url: self.base_url.clone(),
            ticker_suffix: self.ticker_suffix.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_ticker_suffix() -> String {
    DEFAULT_TICKER_SUFFIX.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}

const fn default_batch_timeout_ms() -> u64 {
    15_000
}
