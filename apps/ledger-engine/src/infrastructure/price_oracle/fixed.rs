//! Fixed-table price oracle for offline runs and tests.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{PriceOracleError, PriceOraclePort};
use crate::domain::shared::{Money, Ticker};

/// Price oracle backed by an in-memory table. Unknown tickers are not found.
#[derive(Debug, Default)]
pub struct StaticPriceOracle {
    prices: RwLock<HashMap<Ticker, Money>>,
}

impl StaticPriceOracle {
    /// Create an empty oracle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an oracle with an initial price table.
    #[must_use]
    pub fn with_prices<I, T>(prices: I) -> Self
    where
        I: IntoIterator<Item = (T, Money)>,
        T: Into<Ticker>,
    {
        Self {
            prices: RwLock::new(prices.into_iter().map(|(t, p)| (t.into(), p)).collect()),
        }
    }

    /// Set or replace the price of a ticker.
    pub fn set_price(&self, ticker: impl Into<Ticker>, price: Money) {
        let mut prices = self.prices.write().unwrap_or_else(PoisonError::into_inner);
        prices.insert(ticker.into(), price);
    }

    /// Remove a ticker so it is no longer priceable.
    pub fn remove(&self, ticker: &Ticker) {
        let mut prices = self.prices.write().unwrap_or_else(PoisonError::into_inner);
        prices.remove(ticker);
    }
}

#[async_trait]
impl PriceOraclePort for StaticPriceOracle {
    async fn get_price(&self, ticker: &Ticker) -> Result<Money, PriceOracleError> {
        let prices = self.prices.read().unwrap_or_else(PoisonError::into_inner);
        prices
            .get(ticker)
            .copied()
            .ok_or_else(|| PriceOracleError::TickerNotFound {
                ticker: ticker.to_string(),
            })
    }
}
