//! Trend indicators derived from the close series.
//!
//! - `IndicatorType`: indicator identity + parameters
//! - `CrossoverFrame`: short/middle/long EMAs for one day
//! - `MacdFrame`: MACD line, signal line and histogram for one day
//! - `IndicatorFrame`: either frame, as carried into the ledger output

pub mod ema;
pub mod macd;

pub use ema::{calculate_ema, calculate_ema_triple, smoothing_factor};
pub use macd::{calculate_macd, DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Ema(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossoverFrame {
    pub short: f64,
    pub middle: f64,
    pub long: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdFrame {
    pub macd: f64,
    pub signal: f64,
    pub hist: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorFrame {
    Crossover(CrossoverFrame),
    Macd(MacdFrame),
}

impl IndicatorFrame {
    /// Column names, in the order `values` returns them.
    pub fn headers(&self) -> [&'static str; 3] {
        match self {
            IndicatorFrame::Crossover(_) => ["Short", "Middle", "Long"],
            IndicatorFrame::Macd(_) => ["MACD", "Signal", "Hist"],
        }
    }

    pub fn values(&self) -> [f64; 3] {
        match self {
            IndicatorFrame::Crossover(f) => [f.short, f.middle, f.long],
            IndicatorFrame::Macd(f) => [f.macd, f.signal, f.hist],
        }
    }
}

impl From<CrossoverFrame> for IndicatorFrame {
    fn from(frame: CrossoverFrame) -> Self {
        IndicatorFrame::Crossover(frame)
    }
}

impl From<MacdFrame> for IndicatorFrame {
    fn from(frame: MacdFrame) -> Self {
        IndicatorFrame::Macd(frame)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Ema(span) => write!(f, "EMA({})", span),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
        }
    }
}
