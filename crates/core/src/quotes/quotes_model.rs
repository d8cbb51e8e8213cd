use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockfolio_market_data::Quote;

/// One daily bar of a security's price history, in its native currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl PriceBar {
    /// Bar with every price set to `close`.
    pub fn from_close(date: NaiveDate, close: Decimal) -> Self {
        PriceBar {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: Decimal::ZERO,
        }
    }
}

impl From<&Quote> for PriceBar {
    fn from(quote: &Quote) -> Self {
        let date = quote.timestamp.date_naive();
        match quote.range {
            Some(range) => PriceBar {
                date,
                open: range.open,
                high: range.high,
                low: range.low,
                close: quote.close,
                volume: range.volume,
            },
            None => PriceBar::from_close(date, quote.close),
        }
    }
}
