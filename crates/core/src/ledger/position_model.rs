use serde::Serialize;

use super::transaction_model::{Market, Transaction};

/// All transactions recorded for one ticker.
///
/// Invariant: `transactions` is never empty. Only [`Ledger`](super::Ledger)
/// can create or mutate a position, and it drops the position as soon as the
/// last transaction is deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPosition {
    symbol: String,
    display_name: String,
    market: Market,
    transactions: Vec<Transaction>,
    /// First-appearance order within the ledger; breaks ranking ties.
    sequence: u64,
}

impl SecurityPosition {
    pub(crate) fn new(
        symbol: String,
        display_name: String,
        market: Market,
        transactions: Vec<Transaction>,
        sequence: u64,
    ) -> Self {
        debug_assert!(!transactions.is_empty());
        Self {
            symbol,
            display_name,
            market,
            transactions,
            sequence,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn market(&self) -> Market {
        self.market
    }

    /// Transactions in entry order (not necessarily chronological).
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub(crate) fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Transaction> {
        (index < self.transactions.len()).then(|| self.transactions.remove(index))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Input for rebuilding a position from persisted data.
#[derive(Debug, Clone)]
pub struct NewPosition {
    pub symbol: String,
    pub display_name: String,
    pub market: Market,
    pub transactions: Vec<Transaction>,
}
