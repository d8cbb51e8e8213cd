//! ExchangeRate-API spot rate provider.
//!
//! Uses the keyless `v4/latest/{BASE}` endpoint, which returns every rate
//! quoted against the base currency:
//!
//! ```text
//! { "base": "USD", "date": "2024-10-01", "time_last_updated": 1727740801,
//!   "rates": { "USD": 1, "TWD": 31.9, ... } }
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::ExchangeRate;
use crate::provider::ExchangeRateProvider;

const BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest";
const PROVIDER_ID: &str = "EXCHANGE_RATE_API";

/// Response from the `latest` endpoint
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    base: String,
    #[serde(default)]
    time_last_updated: Option<i64>,
    rates: HashMap<String, f64>,
}

/// Spot FX provider backed by api.exchangerate-api.com.
pub struct ExchangeRateApiProvider {
    client: Client,
}

impl ExchangeRateApiProvider {
    /// Create a provider with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    fn parse_latest_response(
        body: &str,
        from: &str,
        to: &str,
    ) -> Result<ExchangeRate, MarketDataError> {
        let response: LatestRatesResponse =
            serde_json::from_str(body).map_err(|e| MarketDataError::ValidationFailed {
                message: format!("Malformed rates payload: {}", e),
            })?;

        if !response.base.eq_ignore_ascii_case(from) {
            return Err(MarketDataError::ValidationFailed {
                message: format!("Expected base {} but got {}", from, response.base),
            });
        }

        let raw = response
            .rates
            .get(to)
            .copied()
            .ok_or_else(|| MarketDataError::RateNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        let rate = Decimal::from_f64_retain(raw)
            .map(|r| r.round_dp(8).normalize())
            .filter(|r| *r > Decimal::ZERO)
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Unusable rate {} for {}/{}", raw, from, to),
            })?;

        let timestamp: DateTime<Utc> = response
            .time_last_updated
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(Utc::now);

        Ok(ExchangeRate {
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            rate,
            timestamp,
            source: PROVIDER_ID.to_string(),
        })
    }
}

#[async_trait]
impl ExchangeRateProvider for ExchangeRateApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_rate(
        &self,
        from: &str,
        to: &str,
    ) -> Result<ExchangeRate, MarketDataError> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        let url = format!("{}/{}", BASE_URL, urlencoding::encode(&from));

        debug!("Fetching {}/{} from {}", from, to, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::RateNotFound { from, to });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                format!("HTTP {} - {}", status, body),
            ));
        }

        let body = response.text().await.map_err(|e| {
            MarketDataError::provider(PROVIDER_ID, format!("Failed to read response: {}", e))
        })?;

        Self::parse_latest_response(&body, &from, &to)
    }
}
