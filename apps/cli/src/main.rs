//! Stockfolio command line interface.
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod config;
mod main_lib;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use stockfolio_core::ledger::{Market, Transaction, TransactionKind};
use stockfolio_core::portfolio::{rank_by, RankField};

use config::Config;
use main_lib::{build_service, init_tracing};

#[derive(Parser)]
#[command(name = "stockfolio")]
#[command(about = "Track a personal stock portfolio across two markets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Ledger file path (overrides STOCKFOLIO_LEDGER_PATH)
    #[arg(short, long, global = true)]
    ledger: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List positions and their transactions
    List,
    /// Record a buy or sell
    Add {
        symbol: String,
        /// domestic or foreign
        #[arg(short, long)]
        market: Market,
        /// buy or sell
        #[arg(short = 't', long = "type", default_value = "buy")]
        kind: TransactionKind,
        #[arg(short, long)]
        price: Decimal,
        #[arg(short, long)]
        quantity: u32,
        /// Trade date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Display name, used only when the position is new
        #[arg(short, long, default_value = "")]
        name: String,
    },
    /// Delete one transaction by its position in the symbol's list
    Delete { symbol: String, index: usize },
    /// Value the portfolio at current prices
    Report {
        /// Print only a ranking by this field
        #[arg(long)]
        rank: Option<RankField>,
    },
    /// Summarize recent price history for a held symbol
    History { symbol: String },
    /// Rewrite a legacy ledger file in the current format
    Migrate {
        /// File to migrate, defaults to the configured ledger
        path: Option<PathBuf>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config.log_format);
    for issue in &config.issues {
        tracing::warn!("Configuration: {}", issue);
    }

    let cli = Cli::parse();
    let ledger_path = cli.ledger.clone().unwrap_or_else(|| config.ledger_path.clone());

    match cli.command {
        Commands::List => {
            let service = build_service(&config, &ledger_path)?;
            let positions: Vec<_> = service.ledger().list_positions().collect();
            print_json(&json!({
                "positions": positions,
                "loadWarnings": service.load_warnings(),
                "migratedTransactions": service.migrated_transactions(),
            }))
        }
        Commands::Add {
            symbol,
            market,
            kind,
            price,
            quantity,
            date,
            name,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let transaction = Transaction::new(date, kind, price, quantity)?;
            let mut service = build_service(&config, &ledger_path)?;
            let created = service.add_transaction(&symbol, &name, market, transaction)?;
            print_json(&json!({
                "symbol": symbol.trim().to_uppercase(),
                "createdPosition": created,
                "positions": service.ledger().len(),
            }))
        }
        Commands::Delete { symbol, index } => {
            let mut service = build_service(&config, &ledger_path)?;
            match service.delete_transaction(&symbol, index)? {
                Some(removed) => print_json(&json!({ "deleted": removed })),
                None => {
                    tracing::warn!("No transaction #{} for {}", index, symbol);
                    print_json(&json!({ "deleted": null }))
                }
            }
        }
        Commands::Report { rank } => {
            let service = build_service(&config, &ledger_path)?;
            let report = service.refresh().await;
            for warning in &report.warnings {
                tracing::warn!("{:?}", warning);
            }
            match rank {
                Some(field) => print_json(&json!({
                    "field": field.as_str(),
                    "ranking": rank_by(&report.snapshots, field),
                })),
                None => print_json(&report),
            }
        }
        Commands::History { symbol } => {
            let service = build_service(&config, &ledger_path)?;
            let summary = service.history(&symbol).await?;
            print_json(&summary)
        }
        Commands::Migrate { path } => {
            let path = path.unwrap_or(ledger_path);
            let converted = stockfolio_storage_json::migrate_file(&path)?;
            tracing::info!("{} legacy transactions converted", converted);
            print_json(&json!({
                "path": path.display().to_string(),
                "convertedTransactions": converted,
            }))
        }
    }
}
