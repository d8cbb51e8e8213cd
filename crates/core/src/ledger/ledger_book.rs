use log::debug;
use std::collections::HashSet;

use super::position_model::{NewPosition, SecurityPosition};
use super::transaction_model::{Market, Transaction};
use crate::errors::{Error, Result};

/// Normalizes a user-entered ticker: trimmed and upper-cased.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// The full collection of security positions, in first-appearance order.
///
/// This is the single mutable source of truth. It holds no valuation state;
/// snapshots are always recomputed from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    positions: Vec<SecurityPosition>,
    next_sequence: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from persisted positions, keeping their order.
    ///
    /// Rejects empty symbols, empty transaction lists and duplicate symbols.
    pub fn from_positions(positions: Vec<NewPosition>) -> Result<Self> {
        let mut ledger = Ledger::new();
        let mut seen = HashSet::new();

        for position in positions {
            let symbol = normalize_symbol(&position.symbol);
            if symbol.is_empty() {
                return Err(Error::MalformedLedger(
                    "position with an empty symbol".to_string(),
                ));
            }
            if position.transactions.is_empty() {
                return Err(Error::MalformedLedger(format!(
                    "position {} has no transactions",
                    symbol
                )));
            }
            if !seen.insert(symbol.clone()) {
                return Err(Error::MalformedLedger(format!(
                    "duplicate position for {}",
                    symbol
                )));
            }

            let sequence = ledger.take_sequence();
            ledger.positions.push(SecurityPosition::new(
                symbol,
                position.display_name,
                position.market,
                position.transactions,
                sequence,
            ));
        }

        Ok(ledger)
    }

    /// Records a transaction.
    ///
    /// Appends to an existing position for `symbol`, ignoring `name` and
    /// `market` (first write wins), or creates a new position. Returns `true`
    /// when a position was created.
    pub fn add_transaction(
        &mut self,
        symbol: &str,
        name: &str,
        market: Market,
        transaction: Transaction,
    ) -> bool {
        let symbol = normalize_symbol(symbol);

        if let Some(position) = self.positions.iter_mut().find(|p| p.symbol() == symbol) {
            position.push(transaction);
            return false;
        }

        let sequence = self.take_sequence();
        self.positions.push(SecurityPosition::new(
            symbol,
            name.trim().to_string(),
            market,
            vec![transaction],
            sequence,
        ));
        true
    }

    /// Removes the transaction at `index` (entry order) from `symbol`.
    ///
    /// Unknown symbols or out-of-range indexes are a no-op and return `None`.
    /// Removing the last transaction removes the whole position.
    pub fn delete_transaction(&mut self, symbol: &str, index: usize) -> Option<Transaction> {
        let symbol = normalize_symbol(symbol);
        let Some(slot) = self.positions.iter().position(|p| p.symbol() == symbol) else {
            debug!("delete ignored: no position for {}", symbol);
            return None;
        };

        let removed = self.positions[slot].remove(index);
        match removed {
            Some(_) if self.positions[slot].is_empty() => {
                debug!("last transaction of {} deleted, dropping position", symbol);
                self.positions.remove(slot);
            }
            Some(_) => {}
            None => debug!("delete ignored: {} has no transaction #{}", symbol, index),
        }
        removed
    }

    /// Positions in ledger order. Each call starts a fresh iteration.
    pub fn list_positions(&self) -> std::slice::Iter<'_, SecurityPosition> {
        self.positions.iter()
    }

    pub fn get(&self, symbol: &str) -> Option<&SecurityPosition> {
        let symbol = normalize_symbol(symbol);
        self.positions.iter().find(|p| p.symbol() == symbol)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn take_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}
