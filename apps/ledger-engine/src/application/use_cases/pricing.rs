//! Oracle calls shared by the use cases, bounded by a timeout.

use std::collections::HashMap;
use std::time::Duration;

use crate::application::ports::{PriceOracleError, PriceOraclePort};
use crate::domain::ledger::LedgerError;
use crate::domain::shared::{Money, Ticker};
use crate::observability::record_oracle_lookup;

/// Default bound on a single price lookup.
pub const DEFAULT_PRICE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound on a whole batch lookup.
pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Look up one price, mapping oracle failures into ledger errors.
///
/// An unknown ticker becomes `ItemNotFound`; transport failures and timeouts
/// become `Internal`.
pub(crate) async fn lookup_price<P>(
    oracle: &P,
    ticker: &Ticker,
    timeout: Duration,
) -> Result<Money, LedgerError>
where
    P: PriceOraclePort + ?Sized,
{
    match tokio::time::timeout(timeout, oracle.get_price(ticker)).await {
        Ok(Ok(price)) => {
            record_oracle_lookup("single", "ok");
            Ok(price)
        }
        Ok(Err(PriceOracleError::TickerNotFound { ticker })) => {
            record_oracle_lookup("single", "not_found");
            Err(LedgerError::ItemNotFound { ticker })
        }
        Ok(Err(e)) => {
            record_oracle_lookup("single", "error");
            tracing::warn!(ticker = %ticker, error = %e, "Price oracle failed");
            Err(LedgerError::Internal(e.to_string()))
        }
        Err(_) => {
            record_oracle_lookup("single", "timeout");
            tracing::warn!(ticker = %ticker, timeout_ms = timeout.as_millis(), "Price oracle timed out");
            Err(LedgerError::Internal(format!(
                "price oracle timed out after {}ms",
                timeout.as_millis()
            )))
        }
    }
}

/// Best-effort batch lookup. A timed-out batch yields no prices.
pub(crate) async fn lookup_batch<P>(
    oracle: &P,
    tickers: &[Ticker],
    timeout: Duration,
) -> HashMap<Ticker, Money>
where
    P: PriceOraclePort + ?Sized,
{
    if tickers.is_empty() {
        return HashMap::new();
    }
    if let Ok(prices) = tokio::time::timeout(timeout, oracle.get_batch_prices(tickers)).await {
        let outcome = if prices.len() == tickers.len() { "ok" } else { "partial" };
        record_oracle_lookup("batch", outcome);
        prices
    } else {
        record_oracle_lookup("batch", "timeout");
        tracing::warn!(
            tickers = tickers.len(),
            timeout_ms = timeout.as_millis(),
            "Batch price lookup timed out, valuing at zero"
        );
        HashMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        Oracle {}

        #[async_trait]
        impl PriceOraclePort for Oracle {
            async fn get_price(&self, ticker: &Ticker) -> Result<Money, PriceOracleError>;
        }
    }

    struct SlowOracle;

    #[async_trait]
    impl PriceOraclePort for SlowOracle {
        async fn get_price(&self, _ticker: &Ticker) -> Result<Money, PriceOracleError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Money::from_i64(1))
        }
    }

    #[tokio::test]
    async fn not_found_maps_to_item_not_found() {
        let mut oracle = MockOracle::new();
        oracle.expect_get_price().returning(|t| {
            Err(PriceOracleError::TickerNotFound {
                ticker: t.to_string(),
            })
        });
        let err = lookup_price(&oracle, &Ticker::new("XXXX"), DEFAULT_PRICE_TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::ItemNotFound {
                ticker: "XXXX".to_string()
            }
        );
    }

    #[tokio::test]
    async fn network_failure_maps_to_internal() {
        let mut oracle = MockOracle::new();
        oracle.expect_get_price().times(1).returning(|_| {
            Err(PriceOracleError::Network {
                message: "dns".to_string(),
            })
        });
        let err = lookup_price(&oracle, &Ticker::new("BBRI"), DEFAULT_PRICE_TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Internal(_)));
    }

    #[tokio::test]
    async fn price_passes_through() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_get_price()
            .returning(|_| Ok(Money::from_i64(4_500)));
        let price = lookup_price(&oracle, &Ticker::new("BBRI"), DEFAULT_PRICE_TIMEOUT)
            .await
            .unwrap();
        assert_eq!(price, Money::from_i64(4_500));
    }

    #[tokio::test]
    async fn single_timeout_is_internal() {
        let err = lookup_price(&SlowOracle, &Ticker::new("BBRI"), Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Internal(ref m) if m.contains("timed out")));
    }

    #[tokio::test]
    async fn batch_timeout_is_empty() {
        let prices = lookup_batch(&SlowOracle, &[Ticker::new("BBRI")], Duration::from_millis(50)).await;
        assert!(prices.is_empty());
    }

    #[tokio::test]
    async fn empty_batch_skips_oracle() {
        let oracle = MockOracle::new();
        assert!(lookup_batch(&oracle, &[], DEFAULT_BATCH_TIMEOUT).await.is_empty());
    }
}
