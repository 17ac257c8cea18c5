//! Prometheus metrics for the ledger engine.
//!
//! Counters and histograms for settlements, cash adjustments and oracle
//! lookups. Recording is a no-op until [`init_metrics`] installs the
//! exporter, so library users and tests pay nothing.
//!
//! # Example
//!
//! ```ignore
//! use ledger_engine::observability::{init_metrics, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default())?;
//! record_settlement("buy", "ok", 0.002);
//! ```

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{Ipv4Addr, SocketAddr};

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 9090)),
            // 100us to 10s; oracle round-trips dominate the upper end
            latency_buckets: vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
                10.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Ledger Metrics
// ============================================================================

/// Record a settlement attempt.
///
/// # Arguments
///
/// * `direction` - `buy` or `sell`
/// * `outcome` - `ok` or the error reason (e.g. `insufficient_balance`)
/// * `latency_seconds` - Time spent inside the use case
pub fn record_settlement(direction: &str, outcome: &str, latency_seconds: f64) {
    counter!(
        "ledger_settlements_total",
        "direction" => direction.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!(
        "ledger_settlement_duration_seconds",
        "direction" => direction.to_string()
    )
    .record(latency_seconds);
}

/// Record a cash adjustment attempt.
///
/// # Arguments
///
/// * `mode` - `add`, `rem` or `mod`
/// * `outcome` - `ok` or the error reason
pub fn record_balance_adjustment(mode: &str, outcome: &str) {
    counter!(
        "ledger_balance_adjustments_total",
        "mode" => mode.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record a price oracle lookup.
///
/// # Arguments
///
/// * `kind` - `single` or `batch`
/// * `outcome` - `ok`, `not_found`, `error` or `timeout`
pub fn record_oracle_lookup(kind: &str, outcome: &str) {
    counter!(
        "ledger_oracle_lookups_total",
        "kind" => kind.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}
