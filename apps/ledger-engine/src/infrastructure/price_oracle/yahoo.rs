//! Yahoo Finance price oracle adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::ports::{PriceOracleError, PriceOraclePort};
use crate::domain::shared::{Money, Ticker};

/// Default chart API host.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Default exchange suffix appended to tickers (Indonesia Stock Exchange).
pub const DEFAULT_TICKER_SUFFIX: &str = ".JK";

/// Browser user agent; the chart API rejects obvious bots.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Yahoo adapter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YahooOracleConfig {
    /// API host, without trailing slash.
    pub base_url: String,
    /// Suffix appended to every ticker.
    pub ticker_suffix: String,
    /// User-Agent header.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for YahooOracleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ticker_suffix: DEFAULT_TICKER_SUFFIX.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Yahoo Finance chart API adapter.
///
/// Implements `PriceOraclePort` by reading `regularMarketPrice` from the
/// chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooPriceOracle {
    client: reqwest::Client,
    base_url: String,
    ticker_suffix: String,
}

impl YahooPriceOracle {
    /// Create a new Yahoo adapter.
    ///
    /// # Errors
    ///
    /// Returns `Network` if the HTTP client cannot be built.
    pub fn new(config: &YahooOracleConfig) -> Result<Self, PriceOracleError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PriceOracleError::Network {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ticker_suffix: config.ticker_suffix.clone(),
        })
    }

    fn chart_url(&self, ticker: &Ticker) -> String {
        format!(
            "{}/v8/finance/chart/{}{}",
            self.base_url, ticker, self.ticker_suffix
        )
    }

    async fn fetch_chart(&self, ticker: &Ticker) -> Result<ChartResponse, PriceOracleError> {
        let response = self
            .client
            .get(self.chart_url(ticker))
            .send()
            .await
            .map_err(|e| PriceOracleError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PriceOracleError::TickerNotFound {
                ticker: ticker.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PriceOracleError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PriceOracleError::Parse {
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl PriceOraclePort for YahooPriceOracle {
    async fn get_price(&self, ticker: &Ticker) -> Result<Money, PriceOracleError> {
        let chart = self.fetch_chart(ticker).await?;

        let Some(result) = chart.chart.result.and_then(|r| r.into_iter().next()) else {
            return Err(PriceOracleError::TickerNotFound {
                ticker: ticker.to_string(),
            });
        };

        let raw = result
            .meta
            .regular_market_price
            .ok_or_else(|| PriceOracleError::Parse {
                message: format!("no regularMarketPrice for {ticker}"),
            })?;

        let price = Decimal::try_from(raw).map_err(|e| PriceOracleError::Parse {
            message: format!("price {raw} for {ticker}: {e}"),
        })?;

        tracing::debug!(ticker = %ticker, price = %price, "Yahoo price fetched");
        Ok(Money::new(price))
    }
}

// API response types

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn oracle_for(server: &MockServer) -> YahooPriceOracle {
        YahooPriceOracle::new(&YahooOracleConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(2),
            ..YahooOracleConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn chart_url_appends_suffix() {
        let oracle = YahooPriceOracle::new(&YahooOracleConfig {
            base_url: "http://localhost:1/".to_string(),
            ..YahooOracleConfig::default()
        })
        .unwrap();
        assert_eq!(
            oracle.chart_url(&Ticker::new("bbri")),
            "http://localhost:1/v8/finance/chart/BBRI.JK"
        );
    }

    #[tokio::test]
    async fn reads_regular_market_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/BBRI.JK"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "chart": {
                    "result": [{ "meta": { "currency": "IDR", "regularMarketPrice": 4520.0 } }],
                    "error": null
                }
            })))
            .mount(&server)
            .await;

        let price = oracle_for(&server)
            .get_price(&Ticker::new("BBRI"))
            .await
            .unwrap();
        assert_eq!(price, Money::from_i64(4_520));
    }

    #[tokio::test]
    async fn not_found_status_means_unknown_ticker() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "chart": {
                    "result": null,
                    "error": { "code": "Not Found", "description": "No data found" }
                }
            })))
            .mount(&server)
            .await;

        let err = oracle_for(&server)
            .get_price(&Ticker::new("NOPE"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn empty_result_means_unknown_ticker() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "chart": { "result": [], "error": null }
            })))
            .mount(&server)
            .await;

        let err = oracle_for(&server)
            .get_price(&Ticker::new("GONE"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let err = oracle_for(&server)
            .get_price(&Ticker::new("BBRI"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PriceOracleError::Api {
                status: 503,
                message: "busy".to_string()
            }
        );
    }

    #[tokio::test]
    async fn garbage_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = oracle_for(&server)
            .get_price(&Ticker::new("BBRI"))
            .await
            .unwrap_err();
        assert!(matches!(err, PriceOracleError::Parse { .. }));
    }

    #[tokio::test]
    async fn batch_skips_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/TLKM.JK"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "chart": { "result": [{ "meta": { "regularMarketPrice": 3100.0 } }] }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/ZZZZ.JK"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let prices = oracle_for(&server)
            .get_batch_prices(&[Ticker::new("TLKM"), Ticker::new("ZZZZ")])
            .await;
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[&Ticker::new("TLKM")], Money::from_i64(3_100));
    }
}
