//! Settle Order Use Case

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;

use super::pricing::{DEFAULT_PRICE_TIMEOUT, lookup_price};
use super::scope::finish_scope;
use crate::application::dto::{PositionDto, SettleOrderRequestDto, SettlementResponseDto};
use crate::application::ports::PriceOraclePort;
use crate::domain::ledger::services::{
    PositionChange, SettlementOrder, TransactionView, plan_settlement,
};
use crate::domain::ledger::{LedgerError, LedgerScope, LedgerStore, OrderDirection};
use crate::domain::shared::AccountId;
use crate::error::ErrorCode;
use crate::observability::record_settlement;

/// Use case for settling buy and sell orders against balance and positions.
pub struct SettleOrderUseCase<S, P>
where
    S: LedgerStore + ?Sized,
    P: PriceOraclePort + ?Sized,
{
    store: Arc<S>,
    oracle: Arc<P>,
    price_timeout: Duration,
}

impl<S, P> SettleOrderUseCase<S, P>
where
    S: LedgerStore + ?Sized,
    P: PriceOraclePort + ?Sized,
{
    /// Create a new `SettleOrderUseCase`.
    pub const fn new(store: Arc<S>, oracle: Arc<P>) -> Self {
        Self {
            store,
            oracle,
            price_timeout: DEFAULT_PRICE_TIMEOUT,
        }
    }

    /// Bound the ticker confirmation lookup.
    #[must_use]
    pub const fn with_price_timeout(mut self, timeout: Duration) -> Self {
        self.price_timeout = timeout;
        self
    }

    /// Execute the use case.
    ///
    /// Balance, position and transaction log change together or not at all.
    ///
    /// # Errors
    ///
    /// `InvalidInput`, `ItemNotFound`, `AccountNotFound`, `InsufficientAmount`,
    /// `InsufficientBalance`, `MismatchedInfo` or `Internal`.
    #[tracing::instrument(skip(self, request), fields(ticker = %request.ticker))]
    pub async fn execute(
        &self,
        owner: AccountId,
        direction: OrderDirection,
        request: SettleOrderRequestDto,
    ) -> Result<SettlementResponseDto, LedgerError> {
        let started = Instant::now();
        let result = self.settle(owner, direction, request).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => ErrorCode::from(e).metric_label(),
        };
        record_settlement(
            direction.as_str(),
            outcome,
            started.elapsed().as_secs_f64(),
        );

        match &result {
            Ok(settled) => tracing::info!(
                balance = %settled.balance,
                transaction_id = %settled.transaction.id,
                "Order settled"
            ),
            Err(e) if e.is_business_rule() => tracing::info!(error = %e, "Order rejected"),
            Err(e) => tracing::error!(error = %e, "Order settlement failed"),
        }
        result
    }

    async fn settle(
        &self,
        owner: AccountId,
        direction: OrderDirection,
        request: SettleOrderRequestDto,
    ) -> Result<SettlementResponseDto, LedgerError> {
        let order = request.into_order(owner, direction)?;

        // Priceability gate only; the order's own consideration is settled.
        lookup_price(self.oracle.as_ref(), &order.ticker, self.price_timeout).await?;

        let mut scope = self.store.begin(owner).await?;
        let result = Self::apply(scope.as_mut(), &order).await;
        finish_scope(scope, result).await
    }

    async fn apply(
        scope: &mut dyn LedgerScope,
        order: &SettlementOrder,
    ) -> Result<SettlementResponseDto, LedgerError> {
        let balance = scope.balance().await?;
        let existing = scope.find_position(&order.ticker).await?;

        if let Some(position) = &existing
            && position.asset_class() != order.asset_class
        {
            tracing::warn!(
                ticker = %order.ticker,
                held_as = %position.asset_class(),
                ordered_as = %order.asset_class,
                "Asset class differs from stored position; scaling by the order's class"
            );
        }

        let plan = plan_settlement(order, balance, existing, Utc::now())?;

        let balance = scope.apply_balance_delta(plan.balance_delta).await?;
        let position = match plan.position {
            PositionChange::Insert(position) => {
                let dto = PositionDto::from(&position);
                scope.insert_position(position).await?;
                Some(dto)
            }
            PositionChange::Update(position) => {
                let dto = PositionDto::from(&position);
                scope.update_position(position).await?;
                Some(dto)
            }
            PositionChange::Delete(ticker) => {
                scope.delete_position(&ticker).await?;
                None
            }
        };
        let transaction = scope.append_transaction(plan.entry).await?;

        Ok(SettlementResponseDto {
            balance,
            position,
            transaction: TransactionView::from(&transaction),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::OpenAccountRequestDto;
    use crate::application::use_cases::OpenAccountUseCase;
    use crate::domain::ledger::TransactionKind;
    use crate::domain::shared::{Money, Quantity, Ticker};
    use crate::infrastructure::persistence::InMemoryLedgerStore;
    use crate::infrastructure::price_oracle::StaticPriceOracle;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    struct Fixture {
        store: Arc<InMemoryLedgerStore>,
        use_case: SettleOrderUseCase<InMemoryLedgerStore, StaticPriceOracle>,
    }

    async fn fixture(balance: Decimal) -> Fixture {
        let store = Arc::new(InMemoryLedgerStore::new());
        OpenAccountUseCase::new(Arc::clone(&store))
            .execute(OpenAccountRequestDto {
                id: 1,
                name: "Alice".to_string(),
                balance,
            })
            .await
            .unwrap();
        let oracle = Arc::new(StaticPriceOracle::with_prices([
            ("BBRI", Money::from_i64(8_000)),
            ("BTC-USD", Money::from_i64(1_000_000_000)),
        ]));
        Fixture {
            use_case: SettleOrderUseCase::new(Arc::clone(&store), oracle),
            store,
        }
    }

    fn bbri(lots: Decimal, consideration: Decimal, fee: Decimal) -> SettleOrderRequestDto {
        SettleOrderRequestDto {
            ticker: "BBRI".to_string(),
            quantity: lots,
            consideration,
            fee,
            asset_class: "stocks".to_string(),
        }
    }

    const OWNER: AccountId = AccountId::new(1);

    #[tokio::test]
    async fn buy_then_full_sell() {
        let f = fixture(dec!(1000000)).await;

        let bought = f
            .use_case
            .execute(OWNER, OrderDirection::Buy, bbri(dec!(1), dec!(800000), dec!(3000)))
            .await
            .unwrap();
        assert_eq!(bought.balance, Money::from_i64(197_000));
        let position = bought.position.unwrap();
        assert_eq!(position.total_quantity, Quantity::from_i64(100));
        assert_eq!(position.invested_total, Money::from_i64(800_000));

        let sold = f
            .use_case
            .execute(OWNER, OrderDirection::Sell, bbri(dec!(1), dec!(850000), dec!(3000)))
            .await
            .unwrap();
        assert_eq!(sold.balance, Money::from_i64(1_044_000));
        assert!(sold.position.is_none());
        assert_eq!(sold.transaction.kind, TransactionKind::Sell);
        assert_eq!(sold.transaction.base_price, Money::from_i64(800_000));
        assert_eq!(sold.transaction.realized_pnl, Money::from_i64(47_000));

        assert!(f.store.list_positions(OWNER).await.unwrap().is_empty());
        assert_eq!(f.store.list_transactions(OWNER).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_ticker_fails_before_mutation() {
        let f = fixture(dec!(1000000)).await;
        let err = f
            .use_case
            .execute(
                OWNER,
                OrderDirection::Buy,
                SettleOrderRequestDto {
                    ticker: "ZZZZ".to_string(),
                    ..bbri(dec!(1), dec!(100), dec!(0))
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::ItemNotFound { .. }));
        assert!(f.store.list_transactions(OWNER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn underfunded_buy_has_no_side_effects() {
        let f = fixture(dec!(500000)).await;
        let err = f
            .use_case
            .execute(OWNER, OrderDirection::Buy, bbri(dec!(1), dec!(800000), dec!(3000)))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));

        let account = f.store.find_account(OWNER).await.unwrap().unwrap();
        assert_eq!(account.balance(), Money::from_i64(500_000));
        assert!(f.store.list_positions(OWNER).await.unwrap().is_empty());
        assert!(f.store.list_transactions(OWNER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversell_has_no_side_effects() {
        let f = fixture(dec!(1000000)).await;
        f.use_case
            .execute(OWNER, OrderDirection::Buy, bbri(dec!(1), dec!(800000), dec!(0)))
            .await
            .unwrap();

        let err = f
            .use_case
            .execute(OWNER, OrderDirection::Sell, bbri(dec!(2), dec!(1600000), dec!(0)))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAmount { .. }));

        let positions = f.store.list_positions(OWNER).await.unwrap();
        assert_eq!(positions[0].total_quantity(), Quantity::from_i64(100));
        assert_eq!(f.store.list_transactions(OWNER).await.unwrap().len(), 1);
        let account = f.store.find_account(OWNER).await.unwrap().unwrap();
        assert_eq!(account.balance(), Money::from_i64(200_000));
    }

    #[tokio::test]
    async fn crypto_is_not_lot_scaled() {
        let f = fixture(dec!(1000000000)).await;
        let settled = f
            .use_case
            .execute(
                OWNER,
                OrderDirection::Buy,
                SettleOrderRequestDto {
                    ticker: "btc-usd".to_string(),
                    quantity: dec!(0.25),
                    consideration: dec!(250000000),
                    fee: dec!(0),
                    asset_class: "crypto".to_string(),
                },
            )
            .await
            .unwrap();
        let position = settled.position.unwrap();
        assert_eq!(position.ticker, Ticker::new("BTC-USD"));
        assert_eq!(position.total_quantity, Quantity::new(dec!(0.25)));
        assert_eq!(settled.transaction.notes, "Bought 0.25 unit of BTC-USD for 250000000.00");
    }

    #[tokio::test]
    async fn lot_scaling_overflow_is_invalid_input_without_side_effects() {
        let f = fixture(dec!(1000000)).await;
        let err = f
            .use_case
            .execute(OWNER, OrderDirection::Buy, bbri(Decimal::MAX, dec!(100), dec!(0)))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput { ref field, .. } if field == "quantity"));

        let account = f.store.find_account(OWNER).await.unwrap().unwrap();
        assert_eq!(account.balance(), Money::from_i64(1_000_000));
        assert!(f.store.list_positions(OWNER).await.unwrap().is_empty());
        assert!(f.store.list_transactions(OWNER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sell_credit_past_decimal_max_is_invalid_input() {
        let f = fixture(dec!(1000000)).await;
        f.use_case
            .execute(OWNER, OrderDirection::Buy, bbri(dec!(1), dec!(800000), dec!(0)))
            .await
            .unwrap();
        let err = f
            .use_case
            .execute(OWNER, OrderDirection::Sell, bbri(dec!(1), Decimal::MAX, dec!(0)))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput { .. }));
        assert_eq!(f.store.list_positions(OWNER).await.unwrap().len(), 1);
        assert_eq!(f.store.list_transactions(OWNER).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_owner_is_account_not_found() {
        let f = fixture(dec!(0)).await;
        let err = f
            .use_case
            .execute(AccountId::new(99), OrderDirection::Buy, bbri(dec!(1), dec!(1), dec!(0)))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::AccountNotFound {
                owner: AccountId::new(99)
            }
        );
    }

    #[tokio::test]
    async fn concurrent_buys_on_one_owner_never_overdraw() {
        let f = fixture(dec!(1000000)).await;
        let use_case = Arc::new(f.use_case);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let use_case = Arc::clone(&use_case);
                tokio::spawn(async move {
                    use_case
                        .execute(OWNER, OrderDirection::Buy, bbri(dec!(1), dec!(300000), dec!(0)))
                        .await
                })
            })
            .collect();

        let mut settled = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                settled += 1;
            }
        }
        assert_eq!(settled, 3);

        let account = f.store.find_account(OWNER).await.unwrap().unwrap();
        assert_eq!(account.balance(), Money::from_i64(100_000));
        let positions = f.store.list_positions(OWNER).await.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].total_quantity(), Quantity::from_i64(300));
        assert_eq!(positions[0].invested_total(), Money::from_i64(900_000));
    }
}
