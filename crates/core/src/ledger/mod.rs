//! Transaction ledger - per-security buy/sell history and its invariants.

mod ledger_book;
mod ledger_traits;
mod position_model;
mod transaction_model;


pub use ledger_book::{normalize_symbol, Ledger};
pub use ledger_traits::{LedgerLoadWarning, LedgerRepositoryTrait, LoadedLedger};
pub use position_model::{NewPosition, SecurityPosition};
pub use transaction_model::{Market, Transaction, TransactionKind};
