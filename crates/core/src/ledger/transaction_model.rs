//! Transaction domain models.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_TRANSACTION_PRICE;
use crate::errors::ValidationError;

/// Listing market of a security.
///
/// Determines the native currency and how the symbol is addressed in the
/// price feed (see `PortfolioSettings`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Domestic,
    Foreign,
}

impl Market {
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Domestic => "domestic",
            Market::Foreign => "foreign",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Market {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domestic" => Ok(Market::Domestic),
            "foreign" => Ok(Market::Foreign),
            other => Err(ValidationError::InvalidInput(format!(
                "unknown market '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Buy,
    Sell,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy => "buy",
            TransactionKind::Sell => "sell",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TransactionKind::Buy),
            "sell" => Ok(TransactionKind::Sell),
            other => Err(ValidationError::InvalidInput(format!(
                "unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// One completed trade.
///
/// Fields are private: a `Transaction` only exists once its price and
/// quantity have been checked, and it is never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    date: NaiveDate,
    kind: TransactionKind,
    price: Decimal,
    quantity: u32,
}

impl Transaction {
    /// Creates a transaction entered today (local calendar).
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        price: Decimal,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        Self::new_as_of(date, kind, price, quantity, Local::now().date_naive())
    }

    /// Creates a transaction entered on `today`; `date` may not be later.
    pub fn new_as_of(
        date: NaiveDate,
        kind: TransactionKind,
        price: Decimal,
        quantity: u32,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if date > today {
            return Err(ValidationError::FutureDate { date, today });
        }
        Self::restore(date, kind, price, quantity)
    }

    /// Rebuilds a previously entered transaction from storage.
    ///
    /// The entry-time date check does not apply to records that were valid
    /// when they were written.
    pub fn restore(
        date: NaiveDate,
        kind: TransactionKind,
        price: Decimal,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        if price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice(price));
        }
        if price > MAX_TRANSACTION_PRICE {
            return Err(ValidationError::PriceOutOfRange(price));
        }
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        Ok(Self {
            date,
            kind,
            price,
            quantity,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_buy(&self) -> bool {
        self.kind == TransactionKind::Buy
    }
}
