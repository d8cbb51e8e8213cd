//! Property-based integration tests for the valuation engine and aggregator.
//!
//! These tests verify that arithmetic identities hold across arbitrary
//! ledgers, using the `proptest` crate for random test case generation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use stockfolio_core::ledger::{Ledger, Market, SecurityPosition, Transaction, TransactionKind};
use stockfolio_core::portfolio::{aggregate, value_position, ValuationSnapshot};

// =============================================================================
// Generators
// =============================================================================

/// Generates a positive price with two decimal places.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generates a positive FX rate with three decimal places.
fn arb_fx_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000).prop_map(|milli| Decimal::new(milli, 3))
}

fn arb_kind() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![Just(TransactionKind::Buy), Just(TransactionKind::Sell)]
}

fn arb_market() -> impl Strategy<Value = Market> {
    prop_oneof![Just(Market::Domestic), Just(Market::Foreign)]
}

/// Generates a valid transaction with an arbitrary side.
fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (arb_kind(), arb_price(), 1u32..10_000, 0u32..365).prop_map(|(kind, price, qty, offset)| {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + chrono::Days::new(offset as u64);
        Transaction::restore(date, kind, price, qty).unwrap()
    })
}

fn arb_transactions(max: usize) -> impl Strategy<Value = Vec<Transaction>> {
    proptest::collection::vec(arb_transaction(), 1..=max)
}

/// Builds a single-position ledger.
fn single(market: Market, transactions: Vec<Transaction>) -> Ledger {
    let mut ledger = Ledger::new();
    for tx in transactions {
        ledger.add_transaction("TEST", "Test Corp", market, tx);
    }
    ledger
}

/// Values one position; generated amounts stay far inside the decimal range.
fn value(position: &SecurityPosition, price: Decimal, fx_rate: Decimal) -> ValuationSnapshot {
    value_position(position, price, fx_rate).unwrap()
}

/// Values a multi-position ledger with one price per position.
fn value_all(
    positions: &[(Market, Vec<Transaction>, Decimal)],
    fx_rate: Decimal,
) -> Vec<ValuationSnapshot> {
    let mut ledger = Ledger::new();
    for (i, (market, txs, _)) in positions.iter().enumerate() {
        for tx in txs {
            ledger.add_transaction(&format!("SYM{}", i), "", *market, tx.clone());
        }
    }
    ledger
        .list_positions()
        .zip(positions.iter())
        .map(|(position, (_, _, price))| value(position, *price, fx_rate))
        .collect()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Current quantity always equals bought minus sold, even when oversold.
    #[test]
    fn prop_quantity_identity(
        market in arb_market(),
        txs in arb_transactions(20),
        price in arb_price(),
        fx in arb_fx_rate(),
    ) {
        let ledger = single(market, txs);
        let position = ledger.get("TEST").unwrap();
        let snapshot = value(position, price, fx);

        prop_assert_eq!(
            snapshot.current_quantity,
            snapshot.total_buy_quantity as i64 - snapshot.total_sell_quantity as i64
        );
        prop_assert_eq!(snapshot.is_oversold, snapshot.current_quantity < 0);
    }

    /// A position with no buys has a zero average buy price and zero cost.
    #[test]
    fn prop_zero_buys_zero_average(
        prices in proptest::collection::vec(arb_price(), 1..10),
        current in arb_price(),
    ) {
        let txs: Vec<Transaction> = prices
            .into_iter()
            .map(|p| Transaction::restore(
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                TransactionKind::Sell,
                p,
                1,
            ).unwrap())
            .collect();
        let ledger = single(Market::Foreign, txs);
        let snapshot = value(ledger.get("TEST").unwrap(), current, Decimal::ONE);

        prop_assert_eq!(snapshot.average_buy_price, Decimal::ZERO);
        prop_assert_eq!(snapshot.total_buy_cost.local, Decimal::ZERO);
        prop_assert_eq!(snapshot.performance_pct, Decimal::ZERO);
    }

    /// Total P&L is exactly unrealized plus realized, in both currencies.
    #[test]
    fn prop_total_pl_identity(
        market in arb_market(),
        txs in arb_transactions(20),
        price in arb_price(),
        fx in arb_fx_rate(),
    ) {
        let ledger = single(market, txs);
        let snapshot = value(ledger.get("TEST").unwrap(), price, fx);

        prop_assert_eq!(
            snapshot.total_pl.local,
            snapshot.unrealized_pl.local + snapshot.realized_pl.local
        );
        prop_assert_eq!(
            snapshot.total_pl.base,
            snapshot.unrealized_pl.base + snapshot.realized_pl.base
        );
    }

    /// The exchange rate never changes a position's performance percentage.
    #[test]
    fn prop_performance_independent_of_fx(
        txs in arb_transactions(10),
        price in arb_price(),
        fx_a in arb_fx_rate(),
        fx_b in arb_fx_rate(),
    ) {
        let ledger = single(Market::Foreign, txs);
        let position = ledger.get("TEST").unwrap();

        prop_assert_eq!(
            value(position, price, fx_a).performance_pct,
            value(position, price, fx_b).performance_pct
        );
    }

    /// Aggregate totals do not depend on the order of the snapshots.
    #[test]
    fn prop_aggregate_order_independent(
        positions in proptest::collection::vec(
            (arb_market(), arb_transactions(6), arb_price()),
            1..8,
        ),
        fx in arb_fx_rate(),
        rotation in 0usize..8,
    ) {
        let snapshots = value_all(&positions, fx);
        let expected = aggregate(&snapshots);

        let mut reversed = snapshots.clone();
        reversed.reverse();
        prop_assert_eq!(aggregate(&reversed), expected.clone());

        let mut rotated = snapshots.clone();
        let shift = rotation % rotated.len();
        rotated.rotate_left(shift);
        prop_assert_eq!(aggregate(&rotated), expected);
    }
}
