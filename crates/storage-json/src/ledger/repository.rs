use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::model::PositionRecord;
use crate::errors::StorageError;
use stockfolio_core::errors::{Error, Result};
use stockfolio_core::ledger::{
    Ledger, LedgerLoadWarning, LedgerRepositoryTrait, LoadedLedger, NewPosition,
};

/// Ledger repository backed by one JSON file.
pub struct JsonLedgerRepository {
    path: PathBuf,
}

impl JsonLedgerRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonLedgerRepository { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    /// Keeps unreadable content next to the ledger before it can be
    /// overwritten. Reuses a copy with identical content, otherwise picks
    /// the first free `.malformed`, `.malformed.1`, ... name.
    fn preserve_malformed(&self, content: &str) -> std::result::Result<PathBuf, StorageError> {
        let mut attempt = 0u32;
        loop {
            let candidate = if attempt == 0 {
                self.sibling_path(".malformed")
            } else {
                self.sibling_path(&format!(".malformed.{}", attempt))
            };
            match fs::read(&candidate) {
                Ok(existing) if existing == content.as_bytes() => return Ok(candidate),
                Ok(_) => attempt += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    fs::write(&candidate, content)?;
                    return Ok(candidate);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Parses file content; any failure here is malformed content.
    fn parse(content: &str) -> std::result::Result<(Ledger, usize), StorageError> {
        let records: Vec<PositionRecord> = serde_json::from_str(content)?;

        let mut migrated = 0;
        let mut positions: Vec<NewPosition> = Vec::with_capacity(records.len());
        for record in records {
            let (position, legacy) = record.into_domain()?;
            migrated += legacy;
            positions.push(position);
        }

        let ledger = Ledger::from_positions(positions).map_err(|e| match e {
            Error::MalformedLedger(reason) => StorageError::InvalidRecord(reason),
            other => StorageError::InvalidRecord(other.to_string()),
        })?;
        Ok((ledger, migrated))
    }

    fn render(ledger: &Ledger) -> std::result::Result<Vec<u8>, StorageError> {
        let records: Vec<PositionRecord> =
            ledger.list_positions().map(PositionRecord::from).collect();

        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        records.serialize(&mut serializer)?;
        buffer.push(b'\n');
        Ok(buffer)
    }

    fn write_atomically(&self, bytes: &[u8]) -> std::result::Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl LedgerRepositoryTrait for JsonLedgerRepository {
    fn load(&self) -> Result<LoadedLedger> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No ledger at {}, starting empty", self.path.display());
                return Ok(LoadedLedger::default());
            }
            Err(e) => return Err(StorageError::Io(e).into()),
        };

        match Self::parse(&content) {
            Ok((ledger, migrated_transactions)) => {
                if migrated_transactions > 0 {
                    info!(
                        "Read {} legacy transactions from {} as buys",
                        migrated_transactions,
                        self.path.display()
                    );
                }
                debug!(
                    "Loaded {} positions from {}",
                    ledger.len(),
                    self.path.display()
                );
                Ok(LoadedLedger {
                    ledger,
                    warnings: Vec::new(),
                    migrated_transactions,
                })
            }
            Err(e) => {
                let preserved = self.preserve_malformed(&content)?;
                warn!(
                    "Ledger file {} is malformed, using an empty ledger (copy kept at {}): {}",
                    self.path.display(),
                    preserved.display(),
                    e
                );
                Ok(LoadedLedger {
                    ledger: Ledger::new(),
                    warnings: vec![LedgerLoadWarning::MalformedLedger {
                        reason: e.to_string(),
                        preserved_copy: Some(preserved.display().to_string()),
                    }],
                    migrated_transactions: 0,
                })
            }
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let bytes = Self::render(ledger)?;
        self.write_atomically(&bytes)?;
        debug!(
            "Saved {} positions to {}",
            ledger.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Rewrites a ledger file in the current format.
///
/// Returns the number of legacy transactions that were converted. A
/// malformed file is left untouched and reported as an error.
pub fn migrate_file(path: impl AsRef<Path>) -> Result<usize> {
    let repository = JsonLedgerRepository::new(path.as_ref());
    let loaded = repository.load()?;

    if let Some(LedgerLoadWarning::MalformedLedger { reason, .. }) = loaded.warnings.first() {
        return Err(Error::MalformedLedger(reason.clone()));
    }
    if !repository.path().exists() {
        return Err(Error::Repository(format!(
            "no ledger file at {}",
            repository.path().display()
        )));
    }

    repository.save(&loaded.ledger)?;
    info!(
        "Migrated {} ({} legacy transactions converted)",
        repository.path().display(),
        loaded.migrated_transactions
    );
    Ok(loaded.migrated_transactions)
}
