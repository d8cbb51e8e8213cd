use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::valuation::ValuationWarning;

/// Where a resolved rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FxRateSource {
    Live,
    Fallback,
}

/// A rate converting one unit of `from` into `to`, as used for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxQuote {
    pub rate: Decimal,
    pub from: String,
    pub to: String,
    pub source: FxRateSource,
    /// Why the live rate was not used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl FxQuote {
    pub fn is_fallback(&self) -> bool {
        self.source == FxRateSource::Fallback
    }

    /// Warning to attach to a report when this quote is a fallback.
    pub fn fallback_warning(&self) -> Option<ValuationWarning> {
        if !self.is_fallback() {
            return None;
        }
        Some(ValuationWarning::FxRateFallback {
            from: self.from.clone(),
            to: self.to.clone(),
            rate: self.rate,
            reason: self.fallback_reason.clone().unwrap_or_default(),
        })
    }
}
