use async_trait::async_trait;
use rust_decimal::Decimal;

use super::quotes_model::PriceBar;
use crate::errors::Result;
use crate::ledger::Market;

/// Source of current prices and price history.
///
/// Implementations report every failure as `Error::PriceUnavailable` or
/// `Error::HistoryUnavailable`.
#[async_trait]
pub trait PriceGatewayTrait: Send + Sync {
    /// Latest price of `symbol` in its native currency.
    async fn get_current_price(&self, symbol: &str, market: Market) -> Result<Decimal>;

    /// Daily bars covering the last `lookback_days`, oldest first.
    async fn get_history(
        &self,
        symbol: &str,
        market: Market,
        lookback_days: u32,
    ) -> Result<Vec<PriceBar>>;
}

/// Source of spot exchange rates. Failures are `Error::FxRateUnavailable`.
#[async_trait]
pub trait FxRateGatewayTrait: Send + Sync {
    /// Units of `to` per one unit of `from`.
    async fn get_fx_rate(&self, from: &str, to: &str) -> Result<Decimal>;
}
