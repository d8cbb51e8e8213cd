//! Session orchestration: ledger ownership, persistence and valuation runs.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;

use super::aggregate::{
    aggregate, allocations, rank_by, Allocation, PortfolioAggregate, RankField, RankedEntry,
};
use super::history::{summarize_history, HistorySummary};
use super::valuation::{
    average_buy_price, value_positions, PriceLookup, ValuationSnapshot, ValuationWarning,
};
use crate::errors::{Error, Result, ValidationError};
use crate::fx::{FxQuote, FxService};
use crate::ledger::{
    normalize_symbol, Ledger, LedgerLoadWarning, LedgerRepositoryTrait, Market, Transaction,
};
use crate::quotes::{FxRateGatewayTrait, PriceGatewayTrait};
use crate::settings::PortfolioSettings;

/// Everything a presentation layer needs after one refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub generated_at: DateTime<Utc>,
    pub home_currency: String,
    pub fx: FxQuote,
    /// Valued positions in ledger order
    pub snapshots: Vec<ValuationSnapshot>,
    pub aggregate: PortfolioAggregate,
    pub ranked_by_total_pl: Vec<RankedEntry>,
    pub ranked_by_performance: Vec<RankedEntry>,
    pub allocations: Vec<Allocation>,
    pub warnings: Vec<ValuationWarning>,
}

/// Owns the ledger for one session.
///
/// Mutations are applied in memory first and then persisted. A failed write
/// is returned to the caller; the in-memory change is kept.
pub struct PortfolioService {
    repository: Arc<dyn LedgerRepositoryTrait>,
    prices: Arc<dyn PriceGatewayTrait>,
    fx: FxService,
    settings: PortfolioSettings,
    ledger: Ledger,
    load_warnings: Vec<LedgerLoadWarning>,
    migrated_transactions: usize,
}

impl PortfolioService {
    /// Loads the ledger and prepares the gateways.
    ///
    /// Malformed persisted state is not an error here: the repository hands
    /// back an empty ledger and the warning is kept for the caller.
    pub fn open(
        repository: Arc<dyn LedgerRepositoryTrait>,
        prices: Arc<dyn PriceGatewayTrait>,
        fx_gateway: Arc<dyn FxRateGatewayTrait>,
        settings: PortfolioSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let loaded = repository.load()?;

        for warning in &loaded.warnings {
            warn!("Ledger loaded with warning: {:?}", warning);
        }
        if loaded.migrated_transactions > 0 {
            info!(
                "{} legacy transactions read as buys",
                loaded.migrated_transactions
            );
        }
        debug!("Opened ledger with {} positions", loaded.ledger.len());

        Ok(Self {
            repository,
            prices,
            fx: FxService::new(fx_gateway, settings.fallback_fx_rate),
            settings,
            ledger: loaded.ledger,
            load_warnings: loaded.warnings,
            migrated_transactions: loaded.migrated_transactions,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn settings(&self) -> &PortfolioSettings {
        &self.settings
    }

    pub fn load_warnings(&self) -> &[LedgerLoadWarning] {
        &self.load_warnings
    }

    pub fn migrated_transactions(&self) -> usize {
        self.migrated_transactions
    }

    /// Records a validated transaction and persists the ledger.
    ///
    /// Returns `true` when a new position was created.
    pub fn add_transaction(
        &mut self,
        symbol: &str,
        name: &str,
        market: Market,
        transaction: Transaction,
    ) -> Result<bool> {
        if normalize_symbol(symbol).is_empty() {
            return Err(ValidationError::EmptySymbol.into());
        }
        let created = self.ledger.add_transaction(symbol, name, market, transaction);
        info!(
            "Recorded transaction for {}{}",
            normalize_symbol(symbol),
            if created { " (new position)" } else { "" }
        );
        self.repository.save(&self.ledger)?;
        Ok(created)
    }

    /// Deletes one transaction by entry-order index and persists the ledger.
    ///
    /// An unknown symbol or index leaves everything untouched and returns
    /// `Ok(None)` without writing.
    pub fn delete_transaction(
        &mut self,
        symbol: &str,
        index: usize,
    ) -> Result<Option<Transaction>> {
        let removed = self.ledger.delete_transaction(symbol, index);
        if removed.is_some() {
            info!("Deleted transaction #{} of {}", index, normalize_symbol(symbol));
            self.repository.save(&self.ledger)?;
        }
        Ok(removed)
    }

    /// Values the whole ledger against current prices.
    ///
    /// Prices are requested one symbol at a time. Gateway failures turn into
    /// warnings and never touch the ledger.
    pub async fn refresh(&self) -> PortfolioReport {
        let fx = self
            .fx
            .resolve(&self.settings.foreign_currency, &self.settings.home_currency)
            .await;

        let mut prices = HashMap::with_capacity(self.ledger.len());
        for position in self.ledger.list_positions() {
            let lookup = match self
                .prices
                .get_current_price(position.symbol(), position.market())
                .await
            {
                Ok(price) => PriceLookup::Resolved(price),
                Err(Error::PriceUnavailable { reason, .. }) => PriceLookup::Unavailable(reason),
                Err(e) => PriceLookup::Unavailable(e.to_string()),
            };
            prices.insert(position.symbol().to_string(), lookup);
        }

        let run = value_positions(&self.ledger, &prices, fx.rate);

        let mut warnings: Vec<ValuationWarning> = fx.fallback_warning().into_iter().collect();
        warnings.extend(run.warnings);

        let snapshots = run.snapshots;
        debug!(
            "Valued {} of {} positions",
            snapshots.len(),
            self.ledger.len()
        );

        PortfolioReport {
            generated_at: Utc::now(),
            home_currency: self.settings.home_currency.clone(),
            aggregate: aggregate(&snapshots),
            ranked_by_total_pl: rank_by(&snapshots, RankField::TotalPl),
            ranked_by_performance: rank_by(&snapshots, RankField::PerformancePct),
            allocations: allocations(&snapshots),
            fx,
            snapshots,
            warnings,
        }
    }

    /// Summarizes the configured look-back window of `symbol`'s prices.
    pub async fn history(&self, symbol: &str) -> Result<HistorySummary> {
        let position = self
            .ledger
            .get(symbol)
            .ok_or_else(|| Error::InvalidReference(format!("no position for {}", symbol)))?;

        let bars = self
            .prices
            .get_history(
                position.symbol(),
                position.market(),
                self.settings.history_lookback_days,
            )
            .await?;

        let average = average_buy_price(position).ok_or_else(|| Error::HistoryUnavailable {
            symbol: position.symbol().to_string(),
            reason: "buy cost exceeds the representable range".to_string(),
        })?;
        summarize_history(position.symbol(), bars, average)
    }
}
