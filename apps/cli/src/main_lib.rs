use std::path::Path;
use std::sync::Arc;

use stockfolio_core::portfolio::PortfolioService;
use stockfolio_core::quotes::{ProviderFxGateway, QuoteService};
use stockfolio_market_data::{ExchangeRateApiProvider, YahooProvider};
use stockfolio_storage_json::JsonLedgerRepository;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Installs the global subscriber. Output goes to stderr so command results
/// on stdout stay machine-readable; `log` records are forwarded too.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Wires the JSON repository and the live market-data providers into a
/// portfolio service.
pub fn build_service(config: &Config, ledger_path: &Path) -> anyhow::Result<PortfolioService> {
    tracing::debug!("Ledger path in use: {}", ledger_path.display());

    let repository = Arc::new(JsonLedgerRepository::new(ledger_path));
    let quotes = Arc::new(QuoteService::new(
        Arc::new(YahooProvider::new()?),
        config.settings.clone(),
    ));
    let fx = Arc::new(ProviderFxGateway::new(Arc::new(
        ExchangeRateApiProvider::new(config.request_timeout),
    )));

    let service = PortfolioService::open(repository, quotes, fx, config.settings.clone())?;
    Ok(service)
}
