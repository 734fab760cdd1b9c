//! Run summary computed from a finished ledger.

use super::backtest::BacktestResult;
use super::strategy::StrategyKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub strategy: StrategyKind,
    pub days: usize,
    pub final_total: f64,
    pub buys: usize,
    pub sells: usize,
    pub open_shares: u64,
    pub best_total: f64,
    pub worst_total: f64,
    pub max_drawdown: f64,
    pub buy_and_hold_total: f64,
}

impl Metrics {
    pub fn compute(result: &BacktestResult) -> Self {
        let totals: Vec<f64> = result
            .days
            .iter()
            .map(|d| d.ledger.cumulative_total)
            .collect();

        let buys = result
            .days
            .iter()
            .filter(|d| d.signal.buy_price().is_some())
            .count();
        let sells = result
            .days
            .iter()
            .filter(|d| d.signal.sell_price().is_some())
            .count();

        let best_total = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst_total = totals.iter().copied().fold(f64::INFINITY, f64::min);

        let closes: Vec<f64> = result.days.iter().map(|d| d.close).collect();

        Metrics {
            strategy: result.strategy,
            days: result.days.len(),
            final_total: result.final_total(),
            buys,
            sells,
            open_shares: result.final_holding(),
            best_total: if totals.is_empty() { 0.0 } else { best_total },
            worst_total: if totals.is_empty() { 0.0 } else { worst_total },
            max_drawdown: compute_drawdown(&totals),
            buy_and_hold_total: buy_and_hold_total(&closes, result.budget),
        }
    }
}

/// Largest peak-to-trough fall of a running total, in currency units.
pub fn compute_drawdown(totals: &[f64]) -> f64 {
    let Some(&first) = totals.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_dd = 0.0_f64;

    for &total in totals {
        if total > peak {
            peak = total;
        } else if peak - total > max_dd {
            max_dd = peak - total;
        }
    }

    max_dd
}

/// Profit from buying floor(budget / first close) shares on the first day
/// and holding them to the last.
pub fn buy_and_hold_total(closes: &[f64], budget: f64) -> f64 {
    match (closes.first(), closes.last()) {
        (Some(&first), Some(&last)) if first > 0.0 => {
            let shares = (budget / first).floor();
            shares * (last - first)
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::{run_backtest, BacktestConfig};
    use crate::domain::price::PricePoint;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + chrono::Duration::days(i as i64), c))
            .collect()
    }

    #[test]
    fn drawdown_empty() {
        assert_abs_diff_eq!(compute_drawdown(&[]), 0.0);
    }

    #[test]
    fn drawdown_monotonic_rise() {
        assert_abs_diff_eq!(compute_drawdown(&[0.0, 10.0, 20.0]), 0.0);
    }

    #[test]
    fn drawdown_peak_to_trough() {
        let totals = [0.0, 500.0, 200.0, 800.0, 100.0, 300.0];
        assert_abs_diff_eq!(compute_drawdown(&totals), 700.0);
    }

    #[test]
    fn drawdown_below_zero_from_start() {
        assert_abs_diff_eq!(compute_drawdown(&[0.0, -250.0, -100.0]), 250.0);
    }

    #[test]
    fn buy_and_hold_floors_shares() {
        // floor(1000 / 30) = 33 shares, +10 each.
        assert_abs_diff_eq!(buy_and_hold_total(&[30.0, 35.0, 40.0], 1_000.0), 330.0);
        assert_abs_diff_eq!(buy_and_hold_total(&[], 1_000.0), 0.0);
    }

    #[test]
    fn metrics_from_run() {
        let prices = series(&[100.0, 110.0, 120.0, 115.0]);
        let result = run_backtest(&prices, &BacktestConfig::new(StrategyKind::Crossover)).unwrap();
        let m = Metrics::compute(&result);

        assert_eq!(m.strategy, StrategyKind::Crossover);
        assert_eq!(m.days, 4);
        assert_eq!(m.buys, 1);
        assert_eq!(m.sells, 0);
        assert_eq!(m.open_shares, 909);
        assert_abs_diff_eq!(m.final_total, 909.0 * 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.best_total, 909.0 * 10.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.worst_total, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.max_drawdown, 909.0 * 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.buy_and_hold_total, 1_000.0 * 15.0, epsilon = 1e-6);
    }
}
