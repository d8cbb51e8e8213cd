//! Gateway implementations backed by the market-data crate.
//!
//! Provider errors are flattened into the engine's "unavailable" variants
//! here, so nothing above this layer depends on `MarketDataError`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;
use stockfolio_market_data::{ExchangeRateProvider, MarketDataProvider};

use super::quotes_model::PriceBar;
use super::quotes_traits::{FxRateGatewayTrait, PriceGatewayTrait};
use crate::errors::{Error, Result};
use crate::ledger::Market;
use crate::settings::PortfolioSettings;

/// Price gateway over a `MarketDataProvider`.
///
/// Maps ledger symbols to the provider's addressing convention using the
/// configured domestic suffix.
pub struct QuoteService {
    provider: Arc<dyn MarketDataProvider>,
    settings: PortfolioSettings,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, settings: PortfolioSettings) -> Self {
        Self { provider, settings }
    }
}

#[async_trait]
impl PriceGatewayTrait for QuoteService {
    async fn get_current_price(&self, symbol: &str, market: Market) -> Result<Decimal> {
        let provider_symbol = self.settings.provider_symbol(symbol, market);
        let currency = self.settings.native_currency(market);
        debug!(
            "Fetching latest quote for {} from {}",
            provider_symbol,
            self.provider.id()
        );

        let quote = self
            .provider
            .get_latest_quote(&provider_symbol, currency)
            .await
            .map_err(|e| {
                warn!("Latest quote for {} failed: {}", provider_symbol, e);
                Error::PriceUnavailable {
                    symbol: symbol.to_string(),
                    reason: e.to_string(),
                }
            })?;

        debug!("{} last traded at {} {}", provider_symbol, quote.close, quote.currency);
        if quote.close <= Decimal::ZERO {
            return Err(Error::PriceUnavailable {
                symbol: symbol.to_string(),
                reason: format!("provider returned non-positive price {}", quote.close),
            });
        }
        Ok(quote.close)
    }

    async fn get_history(
        &self,
        symbol: &str,
        market: Market,
        lookback_days: u32,
    ) -> Result<Vec<PriceBar>> {
        let provider_symbol = self.settings.provider_symbol(symbol, market);
        let currency = self.settings.native_currency(market);
        let end = Utc::now();
        let start = end - Duration::days(i64::from(lookback_days));
        debug!(
            "Fetching {} days of history for {} ({} to {})",
            lookback_days,
            provider_symbol,
            start.date_naive(),
            end.date_naive()
        );

        let quotes = self
            .provider
            .get_historical_quotes(&provider_symbol, currency, start, end)
            .await
            .map_err(|e| Error::HistoryUnavailable {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            })?;

        let mut bars: Vec<PriceBar> = quotes.iter().map(PriceBar::from).collect();
        bars.sort_by_key(|bar| bar.date);
        Ok(bars)
    }
}

/// FX gateway over an `ExchangeRateProvider`.
pub struct ProviderFxGateway {
    provider: Arc<dyn ExchangeRateProvider>,
}

impl ProviderFxGateway {
    pub fn new(provider: Arc<dyn ExchangeRateProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl FxRateGatewayTrait for ProviderFxGateway {
    async fn get_fx_rate(&self, from: &str, to: &str) -> Result<Decimal> {
        let rate = self
            .provider
            .get_latest_rate(from, to)
            .await
            .map_err(|e| Error::FxRateUnavailable {
                from: from.to_string(),
                to: to.to_string(),
                reason: e.to_string(),
            })?;
        debug!("{} rate {} from {}", rate.pair(), rate.rate, rate.source);
        Ok(rate.rate)
    }
}
