//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9. Every EMA seeds at its
//! first input, so the first frame is always all zeros.

use crate::domain::error::BacktestError;
use crate::domain::indicator::{calculate_ema, MacdFrame};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_span: usize,
) -> Result<Vec<MacdFrame>, BacktestError> {
    let ema_fast = calculate_ema(closes, fast)?;
    let ema_slow = calculate_ema(closes, slow)?;

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = calculate_ema(&macd_line, signal_span)?;

    Ok(macd_line
        .into_iter()
        .zip(signal_line)
        .map(|(macd, signal)| MacdFrame {
            macd,
            signal,
            hist: macd - signal,
        })
        .collect())
}
