//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::application::dto::{
    AccountDto, AccountProfileDto, AdjustBalanceRequestDto, AdjustBalanceResponseDto,
    OpenAccountRequestDto, PositionDto, QuoteDto, SettleOrderRequestDto, SettlementResponseDto,
};
use crate::application::ports::PriceOraclePort;
use crate::application::use_cases::{
    AdjustBalanceUseCase, OpenAccountUseCase, ProjectHistoryUseCase, QuoteTickerUseCase,
    SettleOrderUseCase, ValuatePortfolioUseCase,
};
use crate::domain::ledger::LedgerStore;
use crate::domain::ledger::services::TransactionView;

use super::request::{json_body, parse_direction, parse_owner};
use super::response::{ApiError, ApiResult, HealthResponse};

type Store = dyn LedgerStore;
type Oracle = dyn PriceOraclePort;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Use case for opening accounts.
    pub open_account: Arc<OpenAccountUseCase<Store>>,
    /// Use case for settling buy and sell orders.
    pub settle_order: Arc<SettleOrderUseCase<Store, Oracle>>,
    /// Use case for direct cash adjustments.
    pub adjust_balance: Arc<AdjustBalanceUseCase<Store>>,
    /// Use case for profile and position queries.
    pub valuate_portfolio: Arc<ValuatePortfolioUseCase<Store, Oracle>>,
    /// Use case for the transaction history.
    pub project_history: Arc<ProjectHistoryUseCase<Store>>,
    /// Use case for single-ticker quotes.
    pub quote_ticker: Arc<QuoteTickerUseCase<Oracle>>,
    /// Application version.
    pub version: String,
}

impl AppState {
    /// Wire every use case against one store and one oracle.
    pub fn new(
        store: Arc<Store>,
        oracle: Arc<Oracle>,
        price_timeout: Duration,
        batch_timeout: Duration,
        version: impl Into<String>,
    ) -> Self {
        Self {
            open_account: Arc::new(OpenAccountUseCase::new(Arc::clone(&store))),
            settle_order: Arc::new(
                SettleOrderUseCase::new(Arc::clone(&store), Arc::clone(&oracle))
                    .with_price_timeout(price_timeout),
            ),
            adjust_balance: Arc::new(AdjustBalanceUseCase::new(Arc::clone(&store))),
            valuate_portfolio: Arc::new(
                ValuatePortfolioUseCase::new(Arc::clone(&store), Arc::clone(&oracle))
                    .with_batch_timeout(batch_timeout),
            ),
            project_history: Arc::new(ProjectHistoryUseCase::new(store)),
            quote_ticker: Arc::new(QuoteTickerUseCase::new(oracle).with_price_timeout(price_timeout)),
            version: version.into(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/accounts", post(open_account))
        .route("/api/v1/accounts/{owner}/profile", get(account_profile))
        .route("/api/v1/accounts/{owner}/positions", get(list_positions))
        .route("/api/v1/accounts/{owner}/transactions", get(list_transactions))
        .route("/api/v1/accounts/{owner}/orders/{direction}", post(settle_order))
        .route("/api/v1/accounts/{owner}/balance", post(adjust_balance))
        .route("/api/v1/prices/{ticker}", get(quote_ticker))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Open account endpoint.
async fn open_account(
    State(state): State<AppState>,
    body: Result<Json<OpenAccountRequestDto>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountDto>), ApiError> {
    let request = json_body(body)?;
    let account = state.open_account.execute(request).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Account profile endpoint: balance, equity and priced positions.
async fn account_profile(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> ApiResult<AccountProfileDto> {
    let owner = parse_owner(&owner)?;
    Ok(Json(state.valuate_portfolio.execute(owner).await?))
}

/// Raw position listing endpoint.
async fn list_positions(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> ApiResult<Vec<PositionDto>> {
    let owner = parse_owner(&owner)?;
    Ok(Json(state.valuate_portfolio.positions(owner).await?))
}

/// Transaction history endpoint.
async fn list_transactions(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> ApiResult<Vec<TransactionView>> {
    let owner = parse_owner(&owner)?;
    Ok(Json(state.project_history.execute(owner).await?))
}

/// Buy/sell settlement endpoint.
async fn settle_order(
    State(state): State<AppState>,
    Path((owner, direction)): Path<(String, String)>,
    body: Result<Json<SettleOrderRequestDto>, JsonRejection>,
) -> ApiResult<SettlementResponseDto> {
    let owner = parse_owner(&owner)?;
    let request = json_body(body)?;
    let settled = state
        .settle_order
        .execute(owner, parse_direction(&direction), request)
        .await?;
    Ok(Json(settled))
}

/// Cash adjustment endpoint.
async fn adjust_balance(
    State(state): State<AppState>,
    Path(owner): Path<String>,
    body: Result<Json<AdjustBalanceRequestDto>, JsonRejection>,
) -> ApiResult<AdjustBalanceResponseDto> {
    let owner = parse_owner(&owner)?;
    let request = json_body(body)?;
    Ok(Json(state.adjust_balance.execute(owner, request).await?))
}

/// Ticker quote endpoint.
async fn quote_ticker(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> ApiResult<QuoteDto> {
    Ok(Json(state.quote_ticker.execute(&ticker).await?))
}
