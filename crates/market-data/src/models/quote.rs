use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Open, high, low and traded volume of one session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRange {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: Decimal,
}

/// A provider's price for one trading session of a security.
///
/// Latest-price lookups only read `close`. Daily history also uses `range`
/// when the provider reports a complete one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub timestamp: DateTime<Utc>,
    pub close: Decimal,
    /// Currency `close` is denominated in
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SessionRange>,
}

impl Quote {
    /// Quote carrying only a closing price.
    pub fn closing(timestamp: DateTime<Utc>, close: Decimal, currency: impl Into<String>) -> Self {
        Self {
            timestamp,
            close,
            currency: currency.into(),
            range: None,
        }
    }

    pub fn with_range(mut self, range: SessionRange) -> Self {
        self.range = Some(range);
        self
    }
}
