//! JSON storage for the transaction ledger.

mod model;
mod repository;

#[cfg(test)]
mod repository_tests;

pub use model::{PositionRecord, TransactionRecord};
pub use repository::{migrate_file, JsonLedgerRepository};

// Re-export trait from core for convenience
pub use stockfolio_core::ledger::LedgerRepositoryTrait;
