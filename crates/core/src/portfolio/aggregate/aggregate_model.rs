//! Portfolio-level totals and derived views.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Home-currency totals across a set of valuation snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAggregate {
    /// Sum of buy costs
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub cost_basis: Decimal,
    pub unrealized_pl: Decimal,
    pub realized_pl: Decimal,
    pub total_pl: Decimal,
    /// total_pl / total_invested x 100; 0 when nothing is invested
    pub performance_pct: Decimal,
    pub position_count: usize,
}

/// Share of the portfolio's current value held in one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub symbol: String,
    pub display_name: String,
    /// Current value in home currency
    pub value: Decimal,
    /// Percentage of total current value (0-100)
    pub percentage: Decimal,
}

/// Snapshot field used to rank positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankField {
    TotalPl,
    PerformancePct,
    UnrealizedPl,
    RealizedPl,
    CurrentValue,
}

impl RankField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankField::TotalPl => "total-pl",
            RankField::PerformancePct => "performance-pct",
            RankField::UnrealizedPl => "unrealized-pl",
            RankField::RealizedPl => "realized-pl",
            RankField::CurrentValue => "current-value",
        }
    }
}

impl fmt::Display for RankField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "total-pl" => Ok(RankField::TotalPl),
            "performance-pct" | "performance" => Ok(RankField::PerformancePct),
            "unrealized-pl" => Ok(RankField::UnrealizedPl),
            "realized-pl" => Ok(RankField::RealizedPl),
            "current-value" | "value" => Ok(RankField::CurrentValue),
            other => Err(ValidationError::InvalidInput(format!(
                "unknown rank field '{}'",
                other
            ))),
        }
    }
}

/// One row of a ranking, ascending by `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub symbol: String,
    pub sequence: u64,
    pub value: Decimal,
}
