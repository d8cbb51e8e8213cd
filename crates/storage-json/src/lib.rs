//! JSON file storage implementation for Stockfolio.
//!
//! This crate implements the ledger repository trait defined in
//! `stockfolio-core` on top of a single pretty-printed JSON file. It also
//! reads the older file layout (capitalized keys, buy-only transactions,
//! Chinese market tags) and can rewrite such files in the current format.
//!
//! ```text
//! core (PortfolioService)
//!        │
//!        ▼  LedgerRepositoryTrait
//! storage-json (this crate)
//!        │
//!        ▼
//! my_portfolio.json
//! ```

pub mod errors;
pub mod ledger;

pub use errors::StorageError;
pub use ledger::{migrate_file, JsonLedgerRepository};

// Re-export from stockfolio-core for convenience
pub use stockfolio_core::errors::{Error, Result};
