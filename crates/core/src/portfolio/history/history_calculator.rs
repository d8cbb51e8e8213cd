use rust_decimal::Decimal;

use super::history_model::HistorySummary;
use crate::constants::DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::quotes::PriceBar;

/// Summarizes `bars` (any order) for `symbol`.
///
/// On equal closes the earliest date is reported as the extreme.
pub fn summarize_history(
    symbol: &str,
    bars: Vec<PriceBar>,
    average_buy_price: Decimal,
) -> Result<HistorySummary> {
    let mut bars = bars;
    bars.sort_by_key(|bar| bar.date);

    let (first, last) = match (bars.first(), bars.last()) {
        (Some(first), Some(last)) => (first.clone(), last.clone()),
        _ => {
            return Err(Error::HistoryUnavailable {
                symbol: symbol.to_string(),
                reason: "no price bars in the requested window".to_string(),
            })
        }
    };

    let mut highest = &first;
    let mut lowest = &first;
    let out_of_range = || Error::HistoryUnavailable {
        symbol: symbol.to_string(),
        reason: "prices exceed the representable range".to_string(),
    };

    let mut sum = Decimal::ZERO;
    for bar in &bars {
        if bar.close > highest.close {
            highest = bar;
        }
        if bar.close < lowest.close {
            lowest = bar;
        }
        sum = sum.checked_add(bar.close).ok_or_else(out_of_range)?;
    }
    let period_average_close = (sum / Decimal::from(bars.len())).round_dp(DECIMAL_PRECISION);

    let distance_from_average_buy_pct = if average_buy_price.is_zero() {
        Decimal::ZERO
    } else {
        last.close
            .checked_sub(average_buy_price)
            .and_then(|d| d.checked_div(average_buy_price))
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(out_of_range)?
            .round_dp(DECIMAL_PRECISION)
    };

    Ok(HistorySummary {
        symbol: symbol.to_string(),
        first_date: first.date,
        last_date: last.date,
        period_average_close,
        highest_close: highest.close,
        highest_close_date: highest.date,
        lowest_close: lowest.close,
        lowest_close_date: lowest.date,
        latest_close: last.close,
        average_buy_price,
        distance_from_average_buy_pct,
        bars: bars.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bar(day: u32, close: Decimal) -> PriceBar {
        PriceBar::from_close(NaiveDate::from_ymd_opt(2024, 5, day).unwrap(), close)
    }

    #[test]
    fn test_extremes_and_average() {
        let bars = vec![
            bar(3, dec!(104)),
            bar(1, dec!(100)),
            bar(2, dec!(110)),
            bar(6, dec!(95)),
        ];
        let summary = summarize_history("AAPL", bars, dec!(100)).unwrap();

        assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(summary.last_date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(summary.period_average_close, dec!(102.25));
        assert_eq!(summary.highest_close, dec!(110));
        assert_eq!(summary.highest_close_date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(summary.lowest_close, dec!(95));
        assert_eq!(summary.latest_close, dec!(95));
        assert_eq!(summary.distance_from_average_buy_pct, dec!(-5));
        assert_eq!(summary.bars[0].close, dec!(100));
    }

    #[test]
    fn test_ties_report_earliest_date() {
        let summary =
            summarize_history("2330", vec![bar(2, dec!(600)), bar(1, dec!(600))], dec!(0)).unwrap();
        assert_eq!(summary.highest_close_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(summary.lowest_close_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(summary.distance_from_average_buy_pct, Decimal::ZERO);
    }

    #[test]
    fn test_empty_window_is_unavailable() {
        let err = summarize_history("AAPL", Vec::new(), dec!(100)).unwrap_err();
        assert!(matches!(err, Error::HistoryUnavailable { .. }));
    }

    #[test]
    fn test_out_of_range_closes_are_unavailable() {
        let overflowing_sum = vec![bar(1, Decimal::MAX), bar(2, Decimal::MAX)];
        let err = summarize_history("AAPL", overflowing_sum, dec!(1)).unwrap_err();
        assert!(matches!(err, Error::HistoryUnavailable { .. }));

        let tiny_average = dec!(0.000001);
        let err = summarize_history("AAPL", vec![bar(1, Decimal::MAX)], tiny_average).unwrap_err();
        assert!(matches!(err, Error::HistoryUnavailable { .. }));
    }
}
