use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::quotes::PriceBar;

/// Statistics over a security's recent closing prices, set against the
/// position's average buy price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub symbol: String,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub period_average_close: Decimal,
    pub highest_close: Decimal,
    pub highest_close_date: NaiveDate,
    pub lowest_close: Decimal,
    pub lowest_close_date: NaiveDate,
    pub latest_close: Decimal,
    /// Zero when the position has no buys
    pub average_buy_price: Decimal,
    /// (latest_close - average_buy_price) / average_buy_price x 100
    pub distance_from_average_buy_pct: Decimal,
    pub bars: Vec<PriceBar>,
}
