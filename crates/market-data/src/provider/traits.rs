//! Market data provider trait definitions.
//!
//! This module defines the two contracts that every data source implements:
//! `MarketDataProvider` for security prices and `ExchangeRateProvider` for
//! spot FX rates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::{ExchangeRate, Quote};

/// Trait for security price providers.
///
/// Symbols are passed in the provider's own addressing convention
/// (e.g. `2330.TW` for a Taiwan listing on Yahoo). Mapping a ledger symbol
/// to that form is the caller's job.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "YAHOO".
    ///
    /// Used for logging and as the `source` of returned quotes.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Provider-specific symbol
    /// * `currency` - Currency to stamp on the returned quote
    async fn get_latest_quote(&self, symbol: &str, currency: &str)
        -> Result<Quote, MarketDataError>;

    /// Fetch historical daily quotes for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Provider-specific symbol
    /// * `currency` - Currency to stamp on the returned quotes
    /// * `start` - Start of the date range (inclusive)
    /// * `end` - End of the date range (inclusive)
    ///
    /// # Returns
    ///
    /// Quotes ordered by timestamp ascending, or `NoDataForRange` when the
    /// provider has nothing for the window.
    async fn get_historical_quotes(
        &self,
        symbol: &str,
        currency: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError>;
}

/// Trait for spot exchange-rate providers.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Unique identifier for this provider.
    fn id(&self) -> &'static str;

    /// Fetch the latest rate converting one unit of `from` into `to`.
    async fn get_latest_rate(&self, from: &str, to: &str)
        -> Result<ExchangeRate, MarketDataError>;
}
