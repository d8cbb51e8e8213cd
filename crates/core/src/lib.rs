//! Stockfolio Core - ledger, valuation engine and gateway traits.
//!
//! This crate holds the portfolio logic. It does no I/O of its own: prices,
//! exchange rates and persistence come in through the traits in [`quotes`]
//! and [`ledger`], implemented by the `market-data` and `storage-json`
//! crates.

pub mod constants;
pub mod errors;
pub mod fx;
pub mod ledger;
pub mod portfolio;
pub mod quotes;
pub mod settings;

pub use ledger::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
