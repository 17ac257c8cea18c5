//! Adjust Balance Use Case

use std::sync::Arc;

use super::scope::finish_scope;
use crate::application::dto::{AdjustBalanceRequestDto, AdjustBalanceResponseDto, BalanceAdjustment};
use crate::domain::ledger::services::{TransactionView, plan_adjustment};
use crate::domain::ledger::{LedgerError, LedgerScope, LedgerStore, NewTransaction};
use crate::domain::shared::AccountId;
use crate::error::ErrorCode;
use crate::observability::record_balance_adjustment;

/// Use case for direct cash deposits, withdrawals and resets.
pub struct AdjustBalanceUseCase<S>
where
    S: LedgerStore + ?Sized,
{
    store: Arc<S>,
}

impl<S> AdjustBalanceUseCase<S>
where
    S: LedgerStore + ?Sized,
{
    /// Create a new `AdjustBalanceUseCase`.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// `InvalidInput`, `AccountNotFound`, `InsufficientBalance` or `Internal`.
    #[tracing::instrument(skip(self, request), fields(mode = %request.mode))]
    pub async fn execute(
        &self,
        owner: AccountId,
        request: AdjustBalanceRequestDto,
    ) -> Result<AdjustBalanceResponseDto, LedgerError> {
        let mode_label = request.mode.to_ascii_lowercase();
        let result = self.adjust(owner, request).await;

        match &result {
            Ok(adjusted) => {
                record_balance_adjustment(&mode_label, "ok");
                tracing::info!(balance = %adjusted.balance, "Balance adjusted");
            }
            Err(e) => {
                record_balance_adjustment(&mode_label, ErrorCode::from(e).metric_label());
                tracing::info!(error = %e, "Balance adjustment rejected");
            }
        }
        result
    }

    async fn adjust(
        &self,
        owner: AccountId,
        request: AdjustBalanceRequestDto,
    ) -> Result<AdjustBalanceResponseDto, LedgerError> {
        let adjustment = request.into_adjustment(owner)?;
        let mut scope = self.store.begin(owner).await?;
        let result = Self::apply(scope.as_mut(), adjustment).await;
        finish_scope(scope, result).await
    }

    async fn apply(
        scope: &mut dyn LedgerScope,
        adjustment: BalanceAdjustment,
    ) -> Result<AdjustBalanceResponseDto, LedgerError> {
        let current = scope.balance().await?;
        let delta = plan_adjustment(adjustment.mode, current, adjustment.amount)?;
        let balance = scope.apply_balance_delta(delta).await?;

        let entry = NewTransaction::cashflow(
            adjustment.owner,
            adjustment.bank_source,
            delta,
            adjustment.fee,
            adjustment.notes,
        );
        let transaction = scope.append_transaction(entry).await?;

        Ok(AdjustBalanceResponseDto {
            balance,
            transaction: TransactionView::from(&transaction),
        })
    }
}
