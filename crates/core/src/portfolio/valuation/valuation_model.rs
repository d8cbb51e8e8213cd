//! Portfolio valuation domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DECIMAL_PRECISION;
use crate::ledger::Market;

/// An amount in the security's native currency (`local`) and in the home
/// currency (`base`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MonetaryValue {
    pub local: Decimal,
    pub base: Decimal,
}

impl MonetaryValue {
    pub fn zero() -> Self {
        MonetaryValue {
            local: Decimal::ZERO,
            base: Decimal::ZERO,
        }
    }

    /// Rounds `local` and converts it with `fx_rate`. `None` when the
    /// converted amount does not fit in a `Decimal`.
    pub fn checked_convert(local: Decimal, fx_rate: Decimal) -> Option<Self> {
        let local = local.round_dp(DECIMAL_PRECISION);
        Some(MonetaryValue {
            local,
            base: local.checked_mul(fx_rate)?.round_dp(DECIMAL_PRECISION),
        })
    }

    pub fn checked_add(self, rhs: MonetaryValue) -> Option<Self> {
        Some(MonetaryValue {
            local: self.local.checked_add(rhs.local)?,
            base: self.base.checked_add(rhs.base)?,
        })
    }
}

/// Point-in-time valuation of one security position. Derived, never stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationSnapshot {
    // Identity
    pub symbol: String,
    pub display_name: String,
    pub market: Market,
    pub sequence: u64,

    // Inputs
    pub current_price: Decimal,
    /// Factor applied to reach the home currency (1 for domestic listings).
    pub fx_rate: Decimal,

    // Quantities
    pub total_buy_quantity: u64,
    pub total_sell_quantity: u64,
    pub current_quantity: i64,
    pub is_oversold: bool,

    // Per-share prices, native currency
    pub average_buy_price: Decimal,
    pub average_sell_price: Decimal,

    // Money
    pub total_buy_cost: MonetaryValue,
    pub total_sell_proceeds: MonetaryValue,
    pub cost_basis: MonetaryValue,
    pub current_value: MonetaryValue,
    pub unrealized_pl: MonetaryValue,
    pub realized_pl: MonetaryValue,
    pub total_pl: MonetaryValue,

    /// total_pl / total_buy_cost x 100; identical in both currencies.
    pub performance_pct: Decimal,
}

/// Conditions reported next to valuation results instead of failing them.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValuationWarning {
    /// No current price could be resolved; the position was left out.
    #[serde(rename_all = "camelCase")]
    PriceUnavailable { symbol: String, reason: String },

    /// More shares sold than bought. The position is still valued.
    #[serde(rename_all = "camelCase")]
    OversoldPosition { symbol: String, current_quantity: i64 },

    /// The live FX source failed and the configured fallback rate was used.
    #[serde(rename_all = "camelCase")]
    FxRateFallback {
        from: String,
        to: String,
        rate: Decimal,
        reason: String,
    },

    /// The position's amounts exceed the representable range; the position
    /// was left out.
    #[serde(rename_all = "camelCase")]
    ValuationOverflow { symbol: String },
}

impl ValuationWarning {
    /// Symbol the warning refers to, if any.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            ValuationWarning::PriceUnavailable { symbol, .. }
            | ValuationWarning::OversoldPosition { symbol, .. }
            | ValuationWarning::ValuationOverflow { symbol } => Some(symbol),
            ValuationWarning::FxRateFallback { .. } => None,
        }
    }
}

/// Output of valuing a whole ledger.
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRun {
    /// Snapshots for positions with a resolved price, in ledger order.
    pub snapshots: Vec<ValuationSnapshot>,
    pub warnings: Vec<ValuationWarning>,
}
