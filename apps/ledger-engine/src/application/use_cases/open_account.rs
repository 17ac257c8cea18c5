//! Open Account Use Case

use std::sync::Arc;

use chrono::Utc;

use crate::application::dto::{AccountDto, OpenAccountRequestDto};
use crate::domain::ledger::{Account, LedgerError, LedgerStore};
use crate::domain::shared::{AccountId, Money};

/// Use case for registering an account with an opening balance.
pub struct OpenAccountUseCase<S>
where
    S: LedgerStore + ?Sized,
{
    store: Arc<S>,
}

impl<S> OpenAccountUseCase<S>
where
    S: LedgerStore + ?Sized,
{
    /// Create a new `OpenAccountUseCase`.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name or negative balance, `AlreadyExists`
    /// for a duplicate id.
    #[tracing::instrument(skip(self, request), fields(owner = request.id))]
    pub async fn execute(&self, request: OpenAccountRequestDto) -> Result<AccountDto, LedgerError> {
        let account = Account::open(
            AccountId::new(request.id),
            request.name,
            Money::new(request.balance),
            Utc::now(),
        )?;
        let dto = AccountDto::from(&account);
        self.store.open_account(account).await?;

        tracing::info!(balance = %dto.balance, "Account opened");
        Ok(dto)
    }
}
