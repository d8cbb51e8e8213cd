use rust_decimal::Decimal;

use super::aggregate_model::{Allocation, PortfolioAggregate, RankField, RankedEntry};
use crate::constants::{DECIMAL_PRECISION, DISPLAY_DECIMAL_PRECISION};
use crate::portfolio::valuation::ValuationSnapshot;

/// Sums the home-currency fields of `snapshots`.
///
/// Callers pass only snapshots with a resolved price. Snapshot amounts are
/// fixed-precision decimals, so the totals do not depend on input order.
pub fn aggregate(snapshots: &[ValuationSnapshot]) -> PortfolioAggregate {
    let mut totals = snapshots
        .iter()
        .fold(PortfolioAggregate::default(), |mut acc, s| {
            acc.total_invested += s.total_buy_cost.base;
            acc.current_value += s.current_value.base;
            acc.cost_basis += s.cost_basis.base;
            acc.unrealized_pl += s.unrealized_pl.base;
            acc.realized_pl += s.realized_pl.base;
            acc.total_pl += s.total_pl.base;
            acc.position_count += 1;
            acc
        });

    totals.performance_pct = if totals.total_invested.is_zero() {
        Decimal::ZERO
    } else {
        (totals.total_pl / totals.total_invested * Decimal::ONE_HUNDRED)
            .round_dp(DECIMAL_PRECISION)
    };
    totals
}

fn field_value(snapshot: &ValuationSnapshot, field: RankField) -> Decimal {
    match field {
        RankField::TotalPl => snapshot.total_pl.base,
        RankField::PerformancePct => snapshot.performance_pct,
        RankField::UnrealizedPl => snapshot.unrealized_pl.base,
        RankField::RealizedPl => snapshot.realized_pl.base,
        RankField::CurrentValue => snapshot.current_value.base,
    }
}

/// Ranks snapshots ascending by `field`; ties keep ledger order.
pub fn rank_by(snapshots: &[ValuationSnapshot], field: RankField) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = snapshots
        .iter()
        .map(|s| RankedEntry {
            symbol: s.symbol.clone(),
            sequence: s.sequence,
            value: field_value(s, field),
        })
        .collect();
    ranked.sort_by(|a, b| a.value.cmp(&b.value).then(a.sequence.cmp(&b.sequence)));
    ranked
}

/// Each snapshot's share of total home-currency current value, in ledger
/// order. Percentages are rounded to two places and are all zero when the
/// total is zero.
pub fn allocations(snapshots: &[ValuationSnapshot]) -> Vec<Allocation> {
    let total: Decimal = snapshots.iter().map(|s| s.current_value.base).sum();

    let mut ordered: Vec<&ValuationSnapshot> = snapshots.iter().collect();
    ordered.sort_by_key(|s| s.sequence);

    ordered
        .into_iter()
        .map(|s| {
            let value = s.current_value.base;
            let percentage = if total.is_zero() {
                Decimal::ZERO
            } else {
                (value / total * Decimal::ONE_HUNDRED).round_dp(DISPLAY_DECIMAL_PRECISION)
            };
            Allocation {
                symbol: s.symbol.clone(),
                display_name: s.display_name.clone(),
                value,
                percentage,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Market;
    use crate::portfolio::valuation::MonetaryValue;
    use rust_decimal_macros::dec;

    fn snapshot(
        symbol: &str,
        sequence: u64,
        invested: Decimal,
        value: Decimal,
    ) -> ValuationSnapshot {
        let pl = value - invested;
        let money = |amount: Decimal| MonetaryValue {
            local: amount,
            base: amount,
        };
        ValuationSnapshot {
            symbol: symbol.to_string(),
            display_name: format!("{} Corp", symbol),
            market: Market::Domestic,
            sequence,
            current_price: Decimal::ONE,
            fx_rate: Decimal::ONE,
            total_buy_quantity: 1,
            total_sell_quantity: 0,
            current_quantity: 1,
            is_oversold: false,
            average_buy_price: invested,
            average_sell_price: Decimal::ZERO,
            total_buy_cost: money(invested),
            total_sell_proceeds: MonetaryValue::zero(),
            cost_basis: money(invested),
            current_value: money(value),
            unrealized_pl: money(pl),
            realized_pl: MonetaryValue::zero(),
            total_pl: money(pl),
            performance_pct: if invested.is_zero() {
                Decimal::ZERO
            } else {
                pl / invested * dec!(100)
            },
        }
    }

    #[test]
    fn test_aggregate_totals() {
        let snapshots = vec![
            snapshot("A", 0, dec!(1000), dec!(1200)),
            snapshot("B", 1, dec!(3000), dec!(2700)),
        ];
        let totals = aggregate(&snapshots);

        assert_eq!(totals.total_invested, dec!(4000));
        assert_eq!(totals.current_value, dec!(3900));
        assert_eq!(totals.total_pl, dec!(-100));
        assert_eq!(totals.unrealized_pl, dec!(-100));
        assert_eq!(totals.performance_pct, dec!(-2.5));
        assert_eq!(totals.position_count, 2);
    }

    #[test]
    fn test_aggregate_empty_is_zero() {
        let totals = aggregate(&[]);
        assert_eq!(totals, PortfolioAggregate::default());
        assert_eq!(totals.performance_pct, Decimal::ZERO);
    }

    #[test]
    fn test_aggregate_zero_invested() {
        let totals = aggregate(&[snapshot("A", 0, Decimal::ZERO, dec!(50))]);
        assert_eq!(totals.performance_pct, Decimal::ZERO);
        assert_eq!(totals.total_pl, dec!(50));
    }

    #[test]
    fn test_rank_ascending_with_sequence_tiebreak() {
        let snapshots = vec![
            snapshot("C", 2, dec!(100), dec!(150)),
            snapshot("A", 0, dec!(100), dec!(90)),
            snapshot("B", 1, dec!(100), dec!(150)),
        ];
        let ranked = rank_by(&snapshots, RankField::TotalPl);
        let order: Vec<&str> = ranked.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert_eq!(ranked[0].value, dec!(-10));

        let by_value = rank_by(&snapshots, RankField::CurrentValue);
        assert_eq!(by_value[0].symbol, "A");
        assert_eq!(by_value[1].symbol, "B");
    }

    #[test]
    fn test_allocations() {
        let snapshots = vec![
            snapshot("B", 1, dec!(100), dec!(300)),
            snapshot("A", 0, dec!(100), dec!(100)),
        ];
        let allocs = allocations(&snapshots);
        assert_eq!(allocs[0].symbol, "A");
        assert_eq!(allocs[0].percentage, dec!(25));
        assert_eq!(allocs[1].percentage, dec!(75));
        assert_eq!(allocs[1].display_name, "B Corp");
    }

    #[test]
    fn test_allocations_with_zero_total() {
        let allocs = allocations(&[snapshot("A", 0, dec!(100), Decimal::ZERO)]);
        assert_eq!(allocs[0].percentage, Decimal::ZERO);
    }

    #[test]
    fn test_rank_field_parsing() {
        assert_eq!("total_pl".parse::<RankField>().unwrap(), RankField::TotalPl);
        assert_eq!("Performance".parse::<RankField>().unwrap(), RankField::PerformancePct);
        assert!("volume".parse::<RankField>().is_err());
        assert_eq!(RankField::UnrealizedPl.to_string(), "unrealized-pl");
    }
}
