//! Tests for the JSON ledger repository: round trips, legacy files and
//! malformed content.

use super::repository::{migrate_file, JsonLedgerRepository};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::fs;
use stockfolio_core::errors::Error;
use stockfolio_core::ledger::{
    Ledger, LedgerLoadWarning, LedgerRepositoryTrait, Market, Transaction, TransactionKind,
};
use tempfile::TempDir;

const LEGACY_FILE: &str = r#"[
    {
        "Symbol": "AAPL",
        "Name": "Apple",
        "Market": "美股",
        "Transactions": [
            {"Buy Date": "2024-01-15", "Buy Price": 185.2, "Quantity": 10},
            {"Buy Date": "2024-03-01", "Buy Price": 179.5, "Quantity": 5}
        ]
    },
    {
        "Symbol": "2330",
        "Name": "台積電",
        "Market": "台股",
        "Transactions": [
            {"Buy Date": "2023-11-20", "Buy Price": 580, "Quantity": 1000}
        ]
    }
]"#;

fn repo_in(dir: &TempDir) -> JsonLedgerRepository {
    JsonLedgerRepository::new(dir.path().join("my_portfolio.json"))
}

fn tx(kind: TransactionKind, price: rust_decimal::Decimal, quantity: u32) -> Transaction {
    let date = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
    Transaction::restore(date, kind, price, quantity).unwrap()
}

#[test]
fn test_missing_file_loads_empty_without_warning() {
    let dir = TempDir::new().unwrap();
    let loaded = repo_in(&dir).load().unwrap();

    assert!(loaded.ledger.is_empty());
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.migrated_transactions, 0);
}

#[test]
fn test_save_then_load_preserves_ledger() {
    let dir = TempDir::new().unwrap();
    let repository = repo_in(&dir);

    let mut ledger = Ledger::new();
    let buy = tx(TransactionKind::Buy, dec!(100.25), 10);
    ledger.add_transaction("AAPL", "Apple", Market::Foreign, buy);
    ledger.add_transaction("AAPL", "", Market::Foreign, tx(TransactionKind::Sell, dec!(150), 4));
    let buy = tx(TransactionKind::Buy, dec!(120), 1000);
    ledger.add_transaction("0050", "元大台灣50", Market::Domestic, buy);
    repository.save(&ledger).unwrap();

    let loaded = repository.load().unwrap();
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.migrated_transactions, 0);
    assert_eq!(loaded.ledger, ledger);

    let symbols: Vec<&str> = loaded.ledger.list_positions().map(|p| p.symbol()).collect();
    assert_eq!(symbols, vec!["AAPL", "0050"]);
}

#[test]
fn test_saved_format_uses_current_keys_and_keeps_unicode() {
    let dir = TempDir::new().unwrap();
    let repository = repo_in(&dir);

    let mut ledger = Ledger::new();
    let sell = tx(TransactionKind::Sell, dec!(600), 1);
    ledger.add_transaction("2330", "台積電", Market::Domestic, sell);
    repository.save(&ledger).unwrap();

    let content = fs::read_to_string(repository.path()).unwrap();
    assert!(content.contains("台積電"));
    assert!(content.contains("\"market\": \"domestic\""));
    assert!(content.contains("\"type\": \"sell\""));
    assert!(content.contains("\"date\": \"2024-04-02\""));
    assert!(!content.contains("Buy Date"));

    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value[0]["transactions"][0]["quantity"], 1);
    // no temp file left behind
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_legacy_file_loads_as_buys() {
    let dir = TempDir::new().unwrap();
    let repository = repo_in(&dir);
    fs::write(repository.path(), LEGACY_FILE).unwrap();

    let loaded = repository.load().unwrap();
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.migrated_transactions, 3);

    let aapl = loaded.ledger.get("AAPL").unwrap();
    assert_eq!(aapl.market(), Market::Foreign);
    assert_eq!(aapl.transactions().len(), 2);
    assert!(aapl.transactions().iter().all(|t| t.is_buy()));
    assert_eq!(aapl.transactions()[0].price(), dec!(185.2));

    let tsmc = loaded.ledger.get("2330").unwrap();
    assert_eq!(tsmc.market(), Market::Domestic);
    assert_eq!(tsmc.display_name(), "台積電");
    assert_eq!(tsmc.transactions()[0].quantity(), 1000);
}

#[test]
fn test_mixed_file_migrates_per_record() {
    let dir = TempDir::new().unwrap();
    let repository = repo_in(&dir);
    fs::write(
        repository.path(),
        r#"[{"symbol": "MSFT", "name": "", "market": "foreign", "transactions": [
            {"date": "2024-01-02", "price": 370, "quantity": 3},
            {"date": "2024-02-02", "type": "sell", "price": 400, "quantity": 1.0}
        ]}]"#,
    )
    .unwrap();

    let loaded = repository.load().unwrap();
    assert_eq!(loaded.migrated_transactions, 1);
    let kinds: Vec<TransactionKind> = loaded
        .ledger
        .get("MSFT")
        .unwrap()
        .transactions()
        .iter()
        .map(|t| t.kind())
        .collect();
    assert_eq!(kinds, vec![TransactionKind::Buy, TransactionKind::Sell]);
}

#[test]
fn test_malformed_content_loads_empty_with_warning() {
    let record = |market: &str, transaction: &str| {
        format!(
            r#"{{"symbol": "AAPL", "market": "{}", "transactions": [{}]}}"#,
            market, transaction
        )
    };
    let foreign = |transaction: &str| format!("[{}]", record("foreign", transaction));
    let cases = [
        "{ not json".to_string(),
        r#"{"Symbol": "AAPL"}"#.to_string(),
        format!(
            "[{}]",
            record("mars", r#"{"date": "2024-01-02", "price": 1, "quantity": 1}"#)
        ),
        foreign(r#"{"date": "2024-01-02", "price": 0, "quantity": 1}"#),
        foreign(r#"{"date": "2024-01-02", "price": 1, "quantity": 0}"#),
        foreign(r#"{"date": "2024-01-02", "price": 1000000000000000000000000, "quantity": 1}"#),
        foreign(r#"{"date": "2024-01-02", "price": 1, "quantity": 2.5}"#),
        foreign(r#"{"date": "02/01/2024", "price": 1, "quantity": 1}"#),
        foreign(""),
        foreign(r#"{"date": "2024-01-02", "type": "short", "price": 1, "quantity": 1}"#),
        format!(
            "[{}, {}]",
            record("foreign", r#"{"date": "2024-01-02", "price": 1, "quantity": 1}"#),
            record("foreign", r#"{"date": "2024-01-02", "price": 1, "quantity": 1}"#)
                .replace("\"AAPL\"", "\"aapl\"")
        ),
    ];

    for content in cases {
        let dir = TempDir::new().unwrap();
        let repository = repo_in(&dir);
        fs::write(repository.path(), &content).unwrap();

        let loaded = repository.load().unwrap();
        assert!(loaded.ledger.is_empty(), "expected empty ledger for {}", content);
        assert_eq!(loaded.warnings.len(), 1, "expected a warning for {}", content);
        assert!(matches!(
            loaded.warnings[0],
            LedgerLoadWarning::MalformedLedger { .. }
        ));
    }
}

#[test]
fn test_malformed_content_survives_later_save() {
    let dir = TempDir::new().unwrap();
    let repository = repo_in(&dir);
    let original = r#"[{"Symbol": "AAPL", "Market": "美股", "Transactions": [{"Buy Date": "#;
    fs::write(repository.path(), original).unwrap();

    let loaded = repository.load().unwrap();
    let LedgerLoadWarning::MalformedLedger { preserved_copy, .. } = &loaded.warnings[0];
    let preserved = preserved_copy.clone().unwrap();
    let expected = dir.path().join("my_portfolio.json.malformed");
    assert_eq!(preserved, expected.display().to_string());

    let mut ledger = loaded.ledger;
    let buy = tx(TransactionKind::Buy, dec!(400), 1);
    ledger.add_transaction("MSFT", "", Market::Foreign, buy);
    repository.save(&ledger).unwrap();

    assert_eq!(fs::read_to_string(&preserved).unwrap(), original);
    assert_eq!(repository.load().unwrap().ledger.len(), 1);
}

#[test]
fn test_malformed_copies_are_never_overwritten() {
    let dir = TempDir::new().unwrap();
    let repository = repo_in(&dir);

    fs::write(repository.path(), "first").unwrap();
    repository.load().unwrap();
    // loading the same bad content again reuses the existing copy
    repository.load().unwrap();

    fs::write(repository.path(), "second").unwrap();
    repository.load().unwrap();

    let first = dir.path().join("my_portfolio.json.malformed");
    let second = dir.path().join("my_portfolio.json.malformed.1");
    assert_eq!(fs::read_to_string(first).unwrap(), "first");
    assert_eq!(fs::read_to_string(second).unwrap(), "second");
    assert!(!dir.path().join("my_portfolio.json.malformed.2").exists());
}

#[test]
fn test_migrate_file_rewrites_legacy_layout() {
    let dir = TempDir::new().unwrap();
    let repository = repo_in(&dir);
    fs::write(repository.path(), LEGACY_FILE).unwrap();

    let converted = migrate_file(repository.path()).unwrap();
    assert_eq!(converted, 3);

    let content = fs::read_to_string(repository.path()).unwrap();
    assert!(content.contains("\"type\": \"buy\""));
    assert!(content.contains("\"market\": \"foreign\""));
    assert!(!content.contains("美股"));

    // a second pass has nothing left to convert
    assert_eq!(migrate_file(repository.path()).unwrap(), 0);
}

#[test]
fn test_migrate_file_refuses_malformed_file() {
    let dir = TempDir::new().unwrap();
    let repository = repo_in(&dir);
    fs::write(repository.path(), "garbage").unwrap();

    let err = migrate_file(repository.path()).unwrap_err();
    assert!(matches!(err, Error::MalformedLedger(_)));
    assert_eq!(fs::read_to_string(repository.path()).unwrap(), "garbage");
}

#[test]
fn test_migrate_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = migrate_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Repository(_)));
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let repository = JsonLedgerRepository::new(dir.path().join("nested/deeper/ledger.json"));

    let mut ledger = Ledger::new();
    ledger.add_transaction("AAPL", "", Market::Foreign, tx(TransactionKind::Buy, dec!(1), 1));
    repository.save(&ledger).unwrap();

    assert_eq!(repository.load().unwrap().ledger.len(), 1);
}
