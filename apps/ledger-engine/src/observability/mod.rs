//! Observability module for metrics.
//!
//! Structured logging is set up in [`crate::telemetry`]; this module owns the
//! Prometheus exporter and the ledger's metric names.

mod metrics;

pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_balance_adjustment, record_oracle_lookup,
    record_settlement,
};
