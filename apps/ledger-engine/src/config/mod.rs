//! Configuration module for the ledger engine.
//!
//! YAML configuration with environment variable interpolation and
//! post-parse validation. Every section has defaults, so an empty file
//! yields a runnable configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ledger_engine::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod accounts;
mod observability;
mod oracle;
mod server;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use accounts::SeedAccount;
pub use observability::{LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use oracle::{OracleConfig, OracleProvider};
pub use server::ServerConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Price oracle configuration.
    #[serde(default)]
    pub oracle: OracleConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Accounts opened at startup.
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let metrics = &config.observability.metrics;
    if metrics.enabled && metrics.port == config.server.http_port {
        return Err(ConfigError::ValidationError(
            "http_port and metrics.port must be different".to_string(),
        ));
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "logging.format must be one of: {valid_formats:?}"
        )));
    }

    if config.oracle.request_timeout_ms == 0 || config.oracle.batch_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "oracle timeouts must be positive".to_string(),
        ));
    }

    if let Some((ticker, _)) = config.oracle.prices.iter().find(|(_, p)| p.is_sign_negative()) {
        return Err(ConfigError::ValidationError(format!(
            "oracle.prices.{ticker} cannot be negative"
        )));
    }

    let mut seen = HashSet::new();
    for account in &config.accounts {
        if !seen.insert(account.id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate account id {}",
                account.id
            )));
        }
        if account.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "account {} name cannot be blank",
                account.id
            )));
        }
        if account.balance.is_sign_negative() {
            return Err(ConfigError::ValidationError(format!(
                "account {} opening balance cannot be negative",
                account.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.oracle.provider, OracleProvider::Yahoo);
        assert_eq!(config.oracle.ticker_suffix, ".JK");
        assert_eq!(config.observability.logging.format, "json");
        assert!(!config.observability.metrics.enabled);
        assert!(config.accounts.is_empty());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = match load_config_from_string("") {
            Ok(c) => c,
            Err(e) => panic!("empty config should load: {e}"),
        };
        assert_eq!(config.oracle.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "format: ${LEDGER_CONFIG_TEST_NONEXISTENT_VAR:-pretty}";
        assert_eq!(interpolate_env_vars(input), "format: pretty");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "user_agent: ${LEDGER_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "user_agent: ");
    }

    #[test]
    fn test_validation_metrics_port_clash() {
        let yaml = r"
server:
  http_port: 9090
observability:
  metrics:
    enabled: true
    port: 9090
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for clashing ports");
        };
        assert!(err.to_string().contains("must be different"));
    }

    #[test]
    fn test_validation_duplicate_accounts() {
        let yaml = r"
accounts:
  - id: 1
    name: Alice
  - id: 1
    name: Bob
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for duplicate ids");
        };
        assert!(err.to_string().contains("duplicate account id 1"));
    }

    #[test]
    fn test_validation_bad_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
server:
  http_port: 8000
  bind_address: "127.0.0.1"

oracle:
  provider: static
  request_timeout_ms: 2500
  prices:
    BBRI: 4520
    TLKM: 3100.5

observability:
  logging:
    level: "debug"
    format: "pretty"
  metrics:
    enabled: true
    port: 9100

accounts:
  - id: 1
    name: Alice
    balance: 1000000
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.server.http_addr(), "127.0.0.1:8000");
        assert_eq!(config.oracle.provider, OracleProvider::Static);
        assert_eq!(config.oracle.request_timeout().as_millis(), 2500);
        assert_eq!(config.oracle.prices["BBRI"], dec!(4520));
        assert_eq!(config.oracle.prices["TLKM"], dec!(3100.5));
        assert_eq!(config.observability.logging.level, "debug");
        assert_eq!(config.observability.metrics.port, 9100);
        assert_eq!(config.accounts[0].balance, dec!(1000000));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  http_port: 8181").unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.server.http_port, 8181);
    }

    #[test]
    fn test_missing_file() {
        let Err(err) = load_config(Some("/nonexistent/ledger.yaml")) else {
            panic!("expected read error");
        };
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
