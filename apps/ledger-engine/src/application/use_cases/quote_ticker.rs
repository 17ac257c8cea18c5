//! Quote Ticker Use Case

use std::sync::Arc;
use std::time::Duration;

use super::pricing::{DEFAULT_PRICE_TIMEOUT, lookup_price};
use crate::application::dto::QuoteDto;
use crate::application::ports::PriceOraclePort;
use crate::domain::ledger::LedgerError;
use crate::domain::shared::Ticker;

/// Use case for the current oracle price of a ticker.
pub struct QuoteTickerUseCase<P>
where
    P: PriceOraclePort + ?Sized,
{
    oracle: Arc<P>,
    price_timeout: Duration,
}

impl<P> QuoteTickerUseCase<P>
where
    P: PriceOraclePort + ?Sized,
{
    /// Create a new `QuoteTickerUseCase`.
    pub const fn new(oracle: Arc<P>) -> Self {
        Self {
            oracle,
            price_timeout: DEFAULT_PRICE_TIMEOUT,
        }
    }

    /// Bound the lookup.
    #[must_use]
    pub const fn with_price_timeout(mut self, timeout: Duration) -> Self {
        self.price_timeout = timeout;
        self
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed ticker, `ItemNotFound` for an unknown
    /// one, `Internal` for oracle failures.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, ticker: &str) -> Result<QuoteDto, LedgerError> {
        let ticker = Ticker::new(ticker);
        ticker.validate()?;
        let price = lookup_price(self.oracle.as_ref(), &ticker, self.price_timeout).await?;
        Ok(QuoteDto { ticker, price })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Money;
    use crate::infrastructure::price_oracle::StaticPriceOracle;

    fn use_case() -> QuoteTickerUseCase<StaticPriceOracle> {
        QuoteTickerUseCase::new(Arc::new(StaticPriceOracle::with_prices([(
            "BBCA",
            Money::from_i64(9_875),
        )])))
    }

    #[tokio::test]
    async fn quotes_known_ticker() {
        let quote = use_case().execute("bbca").await.unwrap();
        assert_eq!(quote.ticker, Ticker::new("BBCA"));
        assert_eq!(quote.price, Money::from_i64(9_875));
    }

    #[tokio::test]
    async fn unknown_and_malformed() {
        assert!(matches!(
            use_case().execute("ZZZZ").await,
            Err(LedgerError::ItemNotFound { .. })
        ));
        assert!(matches!(
            use_case().execute("BB CA").await,
            Err(LedgerError::InvalidInput { .. })
        ));
    }
}
