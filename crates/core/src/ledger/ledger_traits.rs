use serde::Serialize;

use super::ledger_book::Ledger;
use crate::errors::Result;

/// Problems found while loading persisted state that did not stop the load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LedgerLoadWarning {
    /// Persisted data failed validation; an empty ledger was used instead.
    /// `preserved_copy` names where the unreadable content was kept, so a
    /// later save cannot destroy it.
    #[serde(rename_all = "camelCase")]
    MalformedLedger {
        reason: String,
        preserved_copy: Option<String>,
    },
}

/// Result of loading the ledger through a repository.
#[derive(Debug, Clone, Default)]
pub struct LoadedLedger {
    pub ledger: Ledger,
    pub warnings: Vec<LedgerLoadWarning>,
    /// Number of legacy transactions converted to the current format.
    pub migrated_transactions: usize,
}

/// Trait defining the contract for ledger persistence.
///
/// `load` must not fail on malformed content: it degrades to an empty
/// ledger and reports a `LedgerLoadWarning` instead. Only genuine storage
/// failures (permissions, broken disks) surface as errors.
pub trait LedgerRepositoryTrait: Send + Sync {
    fn load(&self) -> Result<LoadedLedger>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
}
