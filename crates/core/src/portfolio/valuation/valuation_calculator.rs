use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::valuation_model::{MonetaryValue, ValuationRun, ValuationSnapshot, ValuationWarning};
use crate::constants::{DECIMAL_PRECISION, MAX_VALUATION_TOTAL};
use crate::ledger::{Ledger, Market, SecurityPosition, Transaction};

/// Outcome of resolving the current price of one symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceLookup {
    Resolved(Decimal),
    Unavailable(String),
}

/// Division that yields zero instead of failing on a zero divisor.
/// `None` only when the quotient overflows.
fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        Some(Decimal::ZERO)
    } else {
        numerator.checked_div(denominator)
    }
}

/// Sum of price x quantity over `transactions`.
fn checked_sum<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Option<Decimal> {
    transactions.into_iter().try_fold(Decimal::ZERO, |acc, t| {
        acc.checked_add(t.price().checked_mul(Decimal::from(t.quantity()))?)
    })
}

/// Cost-weighted average buy price of `position`, 0 when it has no buys.
///
/// `None` when the summed buy cost does not fit in a `Decimal`.
pub fn average_buy_price(position: &SecurityPosition) -> Option<Decimal> {
    let buys: Vec<&Transaction> = position
        .transactions()
        .iter()
        .filter(|t| t.is_buy())
        .collect();
    let quantity: u64 = buys.iter().map(|t| u64::from(t.quantity())).sum();
    let cost = checked_sum(buys.iter().copied())?;
    Some(ratio(cost, Decimal::from(quantity))?.round_dp(DECIMAL_PRECISION))
}

/// Values one position at `current_price` (native currency).
///
/// `fx_rate` converts foreign-market amounts into the home currency; it is
/// ignored for domestic positions. Quantities are summed exactly, averages
/// are cost/proceeds weighted, and every division by zero yields zero.
/// Returns `None` when an amount falls outside the `Decimal` range.
///
/// # Arguments
///
/// * `position` - The security position to value.
/// * `current_price` - Latest price in the security's native currency.
/// * `fx_rate` - Foreign-to-home conversion rate.
pub fn value_position(
    position: &SecurityPosition,
    current_price: Decimal,
    fx_rate: Decimal,
) -> Option<ValuationSnapshot> {
    let applied_rate = match position.market() {
        Market::Domestic => Decimal::ONE,
        Market::Foreign => fx_rate,
    };

    let (buys, sells): (Vec<_>, Vec<_>) =
        position.transactions().iter().partition(|t| t.is_buy());

    let total_buy_quantity: u64 = buys.iter().map(|t| u64::from(t.quantity())).sum();
    let total_sell_quantity: u64 = sells.iter().map(|t| u64::from(t.quantity())).sum();
    let total_buy_cost = checked_sum(buys.iter().copied())?;
    let total_sell_proceeds = checked_sum(sells.iter().copied())?;

    // Each side is bounded by u32::MAX per transaction, so the difference fits.
    let current_quantity = total_buy_quantity as i64 - total_sell_quantity as i64;
    let held = Decimal::from(current_quantity);
    let sold = Decimal::from(total_sell_quantity);

    let average_buy_price = ratio(total_buy_cost, Decimal::from(total_buy_quantity))?;
    let average_sell_price = ratio(total_sell_proceeds, sold)?;

    let unrealized_local = current_price
        .checked_sub(average_buy_price)?
        .checked_mul(held)?;
    let sold_at_cost = average_buy_price.checked_mul(sold)?;
    let realized_local = total_sell_proceeds.checked_sub(sold_at_cost)?;

    let unrealized_pl = MonetaryValue::checked_convert(unrealized_local, applied_rate)?;
    let realized_pl = MonetaryValue::checked_convert(realized_local, applied_rate)?;
    let total_pl = unrealized_pl.checked_add(realized_pl)?;
    let total_buy_cost_value = MonetaryValue::checked_convert(total_buy_cost, applied_rate)?;

    let performance_pct = ratio(total_pl.local, total_buy_cost_value.local)?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp(DECIMAL_PRECISION);

    Some(ValuationSnapshot {
        symbol: position.symbol().to_string(),
        display_name: position.display_name().to_string(),
        market: position.market(),
        sequence: position.sequence(),
        current_price,
        fx_rate: applied_rate,
        total_buy_quantity,
        total_sell_quantity,
        current_quantity,
        is_oversold: current_quantity < 0,
        average_buy_price: average_buy_price.round_dp(DECIMAL_PRECISION),
        average_sell_price: average_sell_price.round_dp(DECIMAL_PRECISION),
        total_buy_cost: total_buy_cost_value,
        total_sell_proceeds: MonetaryValue::checked_convert(total_sell_proceeds, applied_rate)?,
        cost_basis: MonetaryValue::checked_convert(
            average_buy_price.checked_mul(held)?,
            applied_rate,
        )?,
        current_value: MonetaryValue::checked_convert(
            current_price.checked_mul(held)?,
            applied_rate,
        )?,
        unrealized_pl,
        realized_pl,
        total_pl,
        performance_pct,
    })
}

/// Sum of the magnitudes of the home-currency amounts that get aggregated.
fn aggregated_magnitude(snapshot: &ValuationSnapshot) -> Option<Decimal> {
    [
        snapshot.total_buy_cost.base,
        snapshot.current_value.base,
        snapshot.cost_basis.base,
        snapshot.unrealized_pl.base,
        snapshot.realized_pl.base,
        snapshot.total_pl.base,
    ]
    .iter()
    .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount.abs()))
}

/// Values every position of the ledger, in ledger order.
///
/// Positions whose price is missing or unavailable are left out and reported
/// as `PriceUnavailable`; a missing price is never treated as zero.
/// Oversold positions are valued and additionally flagged.
pub fn value_positions(
    ledger: &Ledger,
    prices: &HashMap<String, PriceLookup>,
    fx_rate: Decimal,
) -> ValuationRun {
    let mut run = ValuationRun::default();
    let mut magnitude = Decimal::ZERO;

    for position in ledger.list_positions() {
        let symbol = position.symbol();
        let current_price = match prices.get(symbol) {
            Some(PriceLookup::Resolved(price)) => *price,
            Some(PriceLookup::Unavailable(reason)) => {
                warn!("Excluding {} from valuation: {}", symbol, reason);
                run.warnings.push(ValuationWarning::PriceUnavailable {
                    symbol: symbol.to_string(),
                    reason: reason.clone(),
                });
                continue;
            }
            None => {
                warn!("Excluding {} from valuation: no price supplied", symbol);
                run.warnings.push(ValuationWarning::PriceUnavailable {
                    symbol: symbol.to_string(),
                    reason: "no price supplied".to_string(),
                });
                continue;
            }
        };

        let within_budget = value_position(position, current_price, fx_rate).and_then(|s| {
            let total = magnitude.checked_add(aggregated_magnitude(&s)?)?;
            (total <= MAX_VALUATION_TOTAL).then_some((s, total))
        });
        let Some((snapshot, total)) = within_budget else {
            warn!("Excluding {} from valuation: amounts out of range", symbol);
            run.warnings.push(ValuationWarning::ValuationOverflow {
                symbol: symbol.to_string(),
            });
            continue;
        };
        magnitude = total;

        if snapshot.is_oversold {
            debug!(
                "{} is oversold by {} shares",
                symbol,
                snapshot.current_quantity.unsigned_abs()
            );
            run.warnings.push(ValuationWarning::OversoldPosition {
                symbol: symbol.to_string(),
                current_quantity: snapshot.current_quantity,
            });
        }
        run.snapshots.push(snapshot);
    }

    run
}
