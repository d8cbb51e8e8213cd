//! Core error types for Stockfolio.
//!
//! Gateway failures are collapsed into the three "unavailable" variants at
//! the point of use, so the valuation code never has to inspect provider
//! error subtypes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Current price unavailable for {symbol}: {reason}")]
    PriceUnavailable { symbol: String, reason: String },

    #[error("Price history unavailable for {symbol}: {reason}")]
    HistoryUnavailable { symbol: String, reason: String },

    #[error("Exchange rate {from}->{to} unavailable: {reason}")]
    FxRateUnavailable {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Malformed ledger: {0}")]
    MalformedLedger(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Validation errors for user input and persisted records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("Price {0} exceeds the largest accepted price")]
    PriceOutOfRange(Decimal),

    #[error("Quantity must be a positive whole number")]
    ZeroQuantity,

    #[error("Transaction date {date} is after {today}")]
    FutureDate { date: NaiveDate, today: NaiveDate },

    #[error("Symbol must not be empty")]
    EmptySymbol,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
