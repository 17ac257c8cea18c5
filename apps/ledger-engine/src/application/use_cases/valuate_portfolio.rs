//! Valuate Portfolio Use Case
//!
//! Read-only: runs outside any ledger scope and tolerates oracle failure.

use std::sync::Arc;
use std::time::Duration;

use super::pricing::{DEFAULT_BATCH_TIMEOUT, lookup_batch};
use crate::application::dto::{AccountProfileDto, PositionDto};
use crate::application::ports::PriceOraclePort;
use crate::domain::ledger::services::valuate;
use crate::domain::ledger::{LedgerError, LedgerSnapshot, LedgerStore};
use crate::domain::shared::{AccountId, Ticker};

/// Use case for the account profile and position listing.
pub struct ValuatePortfolioUseCase<S, P>
where
    S: LedgerStore + ?Sized,
    P: PriceOraclePort + ?Sized,
{
    store: Arc<S>,
    oracle: Arc<P>,
    batch_timeout: Duration,
}

impl<S, P> ValuatePortfolioUseCase<S, P>
where
    S: LedgerStore + ?Sized,
    P: PriceOraclePort + ?Sized,
{
    /// Create a new `ValuatePortfolioUseCase`.
    pub const fn new(store: Arc<S>, oracle: Arc<P>) -> Self {
        Self {
            store,
            oracle,
            batch_timeout: DEFAULT_BATCH_TIMEOUT,
        }
    }

    /// Bound the whole batch price lookup.
    #[must_use]
    pub const fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = timeout;
        self
    }

    /// Mark every position to market and compute total equity.
    ///
    /// Tickers the oracle cannot price are valued at zero.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` or `Internal` for store failures.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, owner: AccountId) -> Result<AccountProfileDto, LedgerError> {
        let LedgerSnapshot { account, positions } = self.store.snapshot(owner).await?;

        let tickers: Vec<Ticker> = positions.iter().map(|p| p.ticker().clone()).collect();
        let prices = lookup_batch(self.oracle.as_ref(), &tickers, self.batch_timeout).await;
        if prices.len() < tickers.len() {
            tracing::warn!(
                priced = prices.len(),
                held = tickers.len(),
                "Some positions valued at zero"
            );
        }

        let valuation = valuate(account.balance(), &positions, &prices);
        Ok(AccountProfileDto {
            id: account.id(),
            name: account.name().to_string(),
            balance: valuation.balance,
            total_equity: valuation.total_equity,
            positions: valuation.positions,
        })
    }

    /// Stored positions without pricing.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` or `Internal` for store failures.
    pub async fn positions(&self, owner: AccountId) -> Result<Vec<PositionDto>, LedgerError> {
        let positions = self.store.list_positions(owner).await?;
        Ok(positions.iter().map(PositionDto::from).collect())
    }
}
