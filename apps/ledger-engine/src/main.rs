//! Ledger Engine Binary
//!
//! Starts the ledger engine HTTP server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin ledger-engine -- config.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG_PATH`: Config file path when no argument is given (default: config.yaml)
//! - `RUST_LOG`: Overrides the configured log level

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use ledger_engine::application::dto::OpenAccountRequestDto;
use ledger_engine::application::ports::PriceOraclePort;
use ledger_engine::application::use_cases::OpenAccountUseCase;
use ledger_engine::config::{Config, OracleProvider, load_config};
use ledger_engine::domain::ledger::LedgerStore;
use ledger_engine::infrastructure::http::{AppState, create_router};
use ledger_engine::infrastructure::persistence::InMemoryLedgerStore;
use ledger_engine::infrastructure::price_oracle::{StaticPriceOracle, YahooPriceOracle};
use ledger_engine::observability::{MetricsConfig, init_metrics};
use ledger_engine::telemetry::init_tracing;
use ledger_engine::{LedgerError, Money};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CONFIG_PATH").ok());
    let config = load_config(path.as_deref()).context("loading configuration")?;

    init_tracing(&config.observability.logging)?;
    tracing::info!("Starting Ledger Engine");
    log_config(&config);

    if config.observability.metrics.enabled {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics.port));
        init_metrics(&MetricsConfig::with_addr(addr))?;
        tracing::info!(%addr, "Prometheus exporter listening");
    }

    let store: Arc<dyn LedgerStore> = Arc::new(InMemoryLedgerStore::new());
    seed_accounts(&config, Arc::clone(&store)).await?;

    let oracle = create_oracle(&config)?;
    let state = AppState::new(
        store,
        oracle,
        config.oracle.request_timeout(),
        config.oracle.batch_timeout(),
        env!("CARGO_PKG_VERSION"),
    );

    let http_addr = config.server.http_addr();
    let listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("binding {http_addr}"))?;
    tracing::info!(%http_addr, "HTTP server starting");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Ledger engine stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &Config) {
    tracing::info!(
        http_addr = %config.server.http_addr(),
        oracle = ?config.oracle.provider,
        metrics_enabled = config.observability.metrics.enabled,
        seed_accounts = config.accounts.len(),
        "Configuration loaded"
    );
}

/// Open the configured seed accounts. Accounts that already exist are skipped.
async fn seed_accounts(config: &Config, store: Arc<dyn LedgerStore>) -> anyhow::Result<()> {
    let open_account = OpenAccountUseCase::new(store);
    for seed in &config.accounts {
        let request = OpenAccountRequestDto {
            id: seed.id,
            name: seed.name.clone(),
            balance: seed.balance,
        };
        match open_account.execute(request).await {
            Ok(account) => tracing::info!(
                owner = %account.id,
                balance = %account.balance,
                "Seed account opened"
            ),
            Err(LedgerError::AlreadyExists { .. }) => {
                tracing::debug!(owner = seed.id, "Seed account already exists");
            }
            Err(e) => return Err(e).with_context(|| format!("opening seed account {}", seed.id)),
        }
    }
    Ok(())
}

/// Build the configured price oracle.
fn create_oracle(config: &Config) -> anyhow::Result<Arc<dyn PriceOraclePort>> {
    match config.oracle.provider {
        OracleProvider::Yahoo => {
            let oracle = YahooPriceOracle::new(&config.oracle.yahoo())?;
            tracing::info!(base_url = %config.oracle.base_url, "Yahoo price oracle initialized");
            Ok(Arc::new(oracle))
        }
        OracleProvider::Static => {
            let prices = config
                .oracle
                .prices
                .iter()
                .map(|(ticker, price)| (ticker.as_str(), Money::new(*price)));
            let oracle = StaticPriceOracle::with_prices(prices);
            tracing::info!(
                tickers = config.oracle.prices.len(),
                "Static price oracle initialized"
            );
            Ok(Arc::new(oracle))
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
