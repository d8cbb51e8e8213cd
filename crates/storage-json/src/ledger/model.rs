//! File records for the JSON ledger.
//!
//! Field aliases accept the older capitalized layout:
//!
//! ```json
//! { "Symbol": "AAPL", "Name": "Apple", "Market": "美股",
//!   "Transactions": [{ "Buy Date": "2024-01-15", "Buy Price": 185.2, "Quantity": 10 }] }
//! ```

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use stockfolio_core::ledger::{Market, NewPosition, SecurityPosition, Transaction, TransactionKind};

use crate::errors::StorageError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One security position as stored in the file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PositionRecord {
    #[serde(alias = "Symbol")]
    pub symbol: String,
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(alias = "Market")]
    pub market: String,
    #[serde(alias = "Transactions")]
    pub transactions: Vec<TransactionRecord>,
}

/// One transaction as stored in the file. Records without `type` predate
/// sell support and are read as buys.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TransactionRecord {
    #[serde(alias = "Buy Date", alias = "Date")]
    pub date: String,
    #[serde(
        rename = "type",
        alias = "Type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(alias = "Buy Price", alias = "Price")]
    pub price: Decimal,
    #[serde(alias = "Quantity")]
    pub quantity: Number,
}

/// Parses a market tag, including the original Chinese labels.
pub(crate) fn parse_market(tag: &str) -> Result<Market, StorageError> {
    match tag.trim() {
        "美股" => Ok(Market::Foreign),
        "台股" => Ok(Market::Domestic),
        other => other
            .parse::<Market>()
            .map_err(|_| StorageError::InvalidRecord(format!("unknown market '{}'", tag))),
    }
}

/// Whole-share quantity; integral floats such as `10.0` are accepted.
fn parse_quantity(quantity: &Number) -> Result<u32, StorageError> {
    let whole = match quantity.as_u64() {
        Some(q) => Some(q),
        None => quantity
            .as_f64()
            .filter(|q| q.fract() == 0.0 && *q >= 0.0 && *q <= f64::from(u32::MAX))
            .map(|q| q as u64),
    };
    whole
        .and_then(|q| u32::try_from(q).ok())
        .ok_or_else(|| StorageError::InvalidRecord(format!("invalid quantity {}", quantity)))
}

impl TransactionRecord {
    /// Converts to a domain transaction; the flag is set for a legacy buy.
    pub(crate) fn into_domain(self, symbol: &str) -> Result<(Transaction, bool), StorageError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|e| {
            StorageError::InvalidRecord(format!("{}: bad date '{}': {}", symbol, self.date, e))
        })?;

        let (kind, migrated) = match self.kind.as_deref() {
            Some(tag) => (
                tag.parse::<TransactionKind>().map_err(|e| {
                    StorageError::InvalidRecord(format!("{}: {}", symbol, e))
                })?,
                false,
            ),
            None => {
                debug!("{}: transaction on {} has no type, reading as buy", symbol, date);
                (TransactionKind::Buy, true)
            }
        };

        let quantity = parse_quantity(&self.quantity)?;
        let transaction = Transaction::restore(date, kind, self.price, quantity)
            .map_err(|e| StorageError::InvalidRecord(format!("{}: {}", symbol, e)))?;
        Ok((transaction, migrated))
    }
}

impl From<&Transaction> for TransactionRecord {
    fn from(transaction: &Transaction) -> Self {
        TransactionRecord {
            date: transaction.date().format(DATE_FORMAT).to_string(),
            kind: Some(transaction.kind().as_str().to_string()),
            price: transaction.price(),
            quantity: Number::from(transaction.quantity()),
        }
    }
}

impl PositionRecord {
    /// Converts to a domain position, returning the number of legacy
    /// transactions that were read as buys.
    pub(crate) fn into_domain(self) -> Result<(NewPosition, usize), StorageError> {
        let market = parse_market(&self.market)?;
        let mut migrated = 0;
        let mut transactions = Vec::with_capacity(self.transactions.len());

        for record in self.transactions {
            let (transaction, legacy) = record.into_domain(&self.symbol)?;
            if legacy {
                migrated += 1;
            }
            transactions.push(transaction);
        }

        Ok((
            NewPosition {
                symbol: self.symbol,
                display_name: self.name,
                market,
                transactions,
            },
            migrated,
        ))
    }
}

impl From<&SecurityPosition> for PositionRecord {
    fn from(position: &SecurityPosition) -> Self {
        PositionRecord {
            symbol: position.symbol().to_string(),
            name: position.display_name().to_string(),
            market: position.market().as_str().to_string(),
            transactions: position
                .transactions()
                .iter()
                .map(TransactionRecord::from)
                .collect(),
        }
    }
}
