//! Backtest pipeline: prices → indicators → signals → sized trades → ledger.
//!
//! BacktestConfig defines the run parameters; `run_backtest` performs one
//! left-to-right pass over the price series and returns one record per day.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::error::BacktestError;
use super::indicator::{calculate_ema_triple, calculate_macd, IndicatorFrame};
use super::ledger::{LedgerEntry, PortfolioAccountant};
use super::price::{closes, validate_series, PricePoint};
use super::signal::{CrossoverMachine, MomentumMachine, Signal, SignalMachine};
use super::sizing::{PositionSizer, TradeSize};
use super::strategy::{StrategyKind, StrategySpans};

pub const DEFAULT_BUDGET: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub strategy: StrategyKind,
    pub budget: f64,
    pub spans: StrategySpans,
}

impl BacktestConfig {
    pub fn new(strategy: StrategyKind) -> Self {
        BacktestConfig {
            strategy,
            budget: DEFAULT_BUDGET,
            spans: StrategySpans::default(),
        }
    }

    pub fn validate(&self) -> Result<(), BacktestError> {
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(BacktestError::invalid_parameter(
                "budget",
                format!("must be positive, got {}", self.budget),
            ));
        }
        self.spans.validate(self.strategy)
    }
}

/// Everything known about one input day after the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub indicators: IndicatorFrame,
    pub signal: Signal,
    pub trade: TradeSize,
    pub ledger: LedgerEntry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub strategy: StrategyKind,
    pub budget: f64,
    pub days: Vec<DayRecord>,
}

impl BacktestResult {
    pub fn final_total(&self) -> f64 {
        self.days
            .last()
            .map(|d| d.ledger.cumulative_total)
            .unwrap_or(0.0)
    }

    pub fn final_holding(&self) -> u64 {
        self.days
            .last()
            .map(|d| d.ledger.holding_shares)
            .unwrap_or(0)
    }
}

pub fn run_backtest(
    prices: &[PricePoint],
    config: &BacktestConfig,
) -> Result<BacktestResult, BacktestError> {
    config.validate()?;
    validate_series(prices)?;

    let closes = closes(prices);
    let spans = &config.spans;

    debug!(
        strategy = %config.strategy,
        days = prices.len(),
        indicators = ?config.spans.indicators(config.strategy),
        "computing indicators"
    );

    let days = match config.strategy {
        StrategyKind::Crossover => {
            let frames = calculate_ema_triple(&closes, spans.short, spans.middle, spans.long)?;
            fold_days(prices, &frames, CrossoverMachine::new(), config.budget)?
        }
        StrategyKind::Macd => {
            let frames = calculate_macd(&closes, spans.fast, spans.slow, spans.signal)?;
            fold_days(prices, &frames, MomentumMachine::new(), config.budget)?
        }
    };

    let result = BacktestResult {
        strategy: config.strategy,
        budget: config.budget,
        days,
    };

    info!(
        strategy = %result.strategy,
        days = result.days.len(),
        final_total = result.final_total(),
        holding = result.final_holding(),
        "backtest complete"
    );

    Ok(result)
}

fn fold_days<M>(
    prices: &[PricePoint],
    frames: &[M::Frame],
    mut machine: M,
    budget: f64,
) -> Result<Vec<DayRecord>, BacktestError>
where
    M: SignalMachine,
    M::Frame: Copy + Into<IndicatorFrame>,
{
    let mut sizer = PositionSizer::new(budget)?;
    let mut accountant = PortfolioAccountant::new();
    let mut days = Vec::with_capacity(prices.len());

    for (point, frame) in prices.iter().zip(frames) {
        let signal = machine.step(point.close, frame);
        let trade = sizer.size(point.date, &signal)?;
        let ledger = accountant.record(point.date, point.close, &signal, &trade)?;

        match signal {
            Signal::Buy { price } => {
                debug!(date = %point.date, price, shares = trade.shares_to_buy, "buy")
            }
            Signal::Sell { price } => debug!(
                date = %point.date,
                price,
                shares = trade.shares_to_sell,
                total = ledger.cumulative_total,
                "sell"
            ),
            Signal::Hold => {}
        }

        days.push(DayRecord {
            date: point.date,
            close: point.close,
            indicators: (*frame).into(),
            signal,
            trade,
            ledger,
        });
    }

    Ok(days)
}
