use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DOMESTIC_SYMBOL_SUFFIX, DEFAULT_FALLBACK_FX_RATE, DEFAULT_FOREIGN_CURRENCY,
    DEFAULT_HISTORY_LOOKBACK_DAYS, DEFAULT_HOME_CURRENCY,
};
use crate::errors::{Error, Result};
use crate::ledger::Market;

/// Session-wide settings for currency conversion and price-feed addressing.
///
/// The fallback FX rate lives here, not inside any formula: the engine
/// receives whatever rate the FX service resolved and never special-cases it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSettings {
    pub home_currency: String,
    pub foreign_currency: String,
    pub domestic_symbol_suffix: String,
    pub fallback_fx_rate: Decimal,
    pub history_lookback_days: u32,
}

impl Default for PortfolioSettings {
    fn default() -> Self {
        Self {
            home_currency: DEFAULT_HOME_CURRENCY.to_string(),
            foreign_currency: DEFAULT_FOREIGN_CURRENCY.to_string(),
            domestic_symbol_suffix: DEFAULT_DOMESTIC_SYMBOL_SUFFIX.to_string(),
            fallback_fx_rate: DEFAULT_FALLBACK_FX_RATE,
            history_lookback_days: DEFAULT_HISTORY_LOOKBACK_DAYS,
        }
    }
}

impl PortfolioSettings {
    /// Native currency of securities listed on `market`.
    pub fn native_currency(&self, market: Market) -> &str {
        match market {
            Market::Domestic => &self.home_currency,
            Market::Foreign => &self.foreign_currency,
        }
    }

    /// Symbol in the price feed's addressing convention.
    pub fn provider_symbol(&self, symbol: &str, market: Market) -> String {
        match market {
            Market::Domestic if !self.domestic_symbol_suffix.is_empty() => {
                format!("{}{}", symbol, self.domestic_symbol_suffix)
            }
            _ => symbol.to_string(),
        }
    }

    /// Rejects settings the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.home_currency.trim().is_empty() || self.foreign_currency.trim().is_empty() {
            return Err(Error::InvalidConfigValue(
                "currency codes must not be empty".to_string(),
            ));
        }
        if self.home_currency.eq_ignore_ascii_case(&self.foreign_currency) {
            return Err(Error::InvalidConfigValue(format!(
                "home and foreign currency are both {}",
                self.home_currency
            )));
        }
        if self.fallback_fx_rate <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "fallback FX rate must be positive, got {}",
                self.fallback_fx_rate
            )));
        }
        if self.history_lookback_days == 0 {
            return Err(Error::InvalidConfigValue(
                "history look-back must be at least one day".to_string(),
            ));
        }
        Ok(())
    }
}
