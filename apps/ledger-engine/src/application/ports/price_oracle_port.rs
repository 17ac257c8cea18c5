//! Price Oracle Port (Driven Port)
//!
//! Interface for looking up current unit prices.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::join_all;

use crate::domain::shared::{Money, Ticker};

/// Price oracle error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceOracleError {
    /// The oracle does not know the ticker.
    #[error("Ticker not found: {ticker}")]
    TickerNotFound {
        /// The unknown ticker.
        ticker: String,
    },

    /// Transport failure or timeout.
    #[error("Price oracle network error: {message}")]
    Network {
        /// Error details.
        message: String,
    },

    /// Upstream answered with an error status.
    #[error("Price oracle API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error details.
        message: String,
    },

    /// Upstream answered with an unusable body.
    #[error("Price oracle parse error: {message}")]
    Parse {
        /// Error details.
        message: String,
    },
}

impl PriceOracleError {
    /// Whether the failure means the ticker does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TickerNotFound { .. })
    }
}

/// Port for current market prices.
#[async_trait]
pub trait PriceOraclePort: Send + Sync {
    /// Current unit price of a ticker.
    async fn get_price(&self, ticker: &Ticker) -> Result<Money, PriceOracleError>;

    /// Best-effort prices for many tickers.
    ///
    /// Issues one concurrent lookup per ticker and joins them all. Failed
    /// lookups are logged and left out of the map; this never errors.
    async fn get_batch_prices(&self, tickers: &[Ticker]) -> HashMap<Ticker, Money> {
        let lookups = tickers.iter().map(|ticker| async move {
            let result = self.get_price(ticker).await;
            (ticker, result)
        });

        let mut prices = HashMap::with_capacity(tickers.len());
        for (ticker, result) in join_all(lookups).await {
            match result {
                Ok(price) => {
                    prices.insert(ticker.clone(), price);
                }
                Err(e) => {
                    tracing::warn!(ticker = %ticker, error = %e, "Price lookup failed, omitting");
                }
            }
        }
        prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HalfKnownOracle;

    #[async_trait]
    impl PriceOraclePort for HalfKnownOracle {
        async fn get_price(&self, ticker: &Ticker) -> Result<Money, PriceOracleError> {
            match ticker.as_str() {
                "BBRI" => Ok(Money::from_i64(4_500)),
                "TLKM" => Ok(Money::from_i64(3_100)),
                "DOWN" => Err(PriceOracleError::Network {
                    message: "connection reset".to_string(),
                }),
                other => Err(PriceOracleError::TickerNotFound {
                    ticker: other.to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn batch_omits_failures() {
        let tickers = vec![
            Ticker::new("BBRI"),
            Ticker::new("NOPE"),
            Ticker::new("TLKM"),
            Ticker::new("DOWN"),
        ];
        let prices = HalfKnownOracle.get_batch_prices(&tickers).await;

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[&Ticker::new("BBRI")], Money::from_i64(4_500));
        assert_eq!(prices[&Ticker::new("TLKM")], Money::from_i64(3_100));
        assert!(!prices.contains_key(&Ticker::new("NOPE")));
    }

    #[tokio::test]
    async fn batch_of_nothing_is_empty() {
        assert!(HalfKnownOracle.get_batch_prices(&[]).await.is_empty());
    }

    #[test]
    fn not_found_classification() {
        let err = PriceOracleError::TickerNotFound {
            ticker: "X".to_string(),
        };
        assert!(err.is_not_found());
        assert!(
            !PriceOracleError::Parse {
                message: "bad json".to_string()
            }
            .is_not_found()
        );
    }
}
