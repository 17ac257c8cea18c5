//! Project History Use Case

use std::sync::Arc;

use crate::domain::ledger::services::{TransactionView, project};
use crate::domain::ledger::{LedgerError, LedgerStore};
use crate::domain::shared::AccountId;

/// Use case for the transaction history with realized P&L.
pub struct ProjectHistoryUseCase<S>
where
    S: LedgerStore + ?Sized,
{
    store: Arc<S>,
}

impl<S> ProjectHistoryUseCase<S>
where
    S: LedgerStore + ?Sized,
{
    /// Create a new `ProjectHistoryUseCase`.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every transaction of the owner, in insertion order.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` or `Internal` for store failures.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, owner: AccountId) -> Result<Vec<TransactionView>, LedgerError> {
        let transactions = self.store.list_transactions(owner).await?;
        Ok(project(&transactions))
    }
}
