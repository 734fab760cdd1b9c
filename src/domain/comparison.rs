//! Side-by-side strategy comparison across symbols.

use tracing::{info, warn};

use super::backtest::{run_backtest, BacktestConfig};
use super::error::BacktestError;
use super::metrics::buy_and_hold_total;
use super::price::{closes, DateRange};
use super::strategy::{StrategyKind, StrategySpans};
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub code: String,
    pub crossover_total: f64,
    pub macd_total: f64,
    pub buy_and_hold_total: f64,
}

/// Runs both strategies on every code and returns one row per code that
/// produced results. Codes whose data cannot be fetched or run are skipped;
/// an `InternalConsistency` error aborts the whole comparison.
pub fn compare_strategies(
    data_port: &dyn DataPort,
    codes: &[String],
    range: DateRange,
    budget: f64,
    spans: StrategySpans,
) -> Result<Vec<ComparisonRow>, BacktestError> {
    let mut rows = Vec::with_capacity(codes.len());

    for code in codes {
        match compare_one(data_port, code, range, budget, spans) {
            Ok(row) => {
                info!(
                    code = %row.code,
                    crossover = row.crossover_total,
                    macd = row.macd_total,
                    hold = row.buy_and_hold_total,
                    "compared"
                );
                rows.push(row);
            }
            Err(e @ BacktestError::InternalConsistency { .. }) => return Err(e),
            Err(e) => warn!(%code, error = %e, "skipping"),
        }
    }

    if rows.is_empty() {
        return Err(BacktestError::NoData {
            code: codes.join(","),
        });
    }
    Ok(rows)
}

fn compare_one(
    data_port: &dyn DataPort,
    code: &str,
    range: DateRange,
    budget: f64,
    spans: StrategySpans,
) -> Result<ComparisonRow, BacktestError> {
    let prices = data_port.fetch_prices(code, range)?;

    let run = |strategy: StrategyKind| {
        let config = BacktestConfig {
            strategy,
            budget,
            spans,
        };
        run_backtest(&prices, &config).map(|r| r.final_total())
    };

    Ok(ComparisonRow {
        code: code.to_string(),
        crossover_total: run(StrategyKind::Crossover)?,
        macd_total: run(StrategyKind::Macd)?,
        buy_and_hold_total: buy_and_hold_total(&closes(&prices), budget),
    })
}
