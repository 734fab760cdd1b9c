//! Strategy selection and indicator spans.

use std::fmt;
use std::str::FromStr;

use super::error::BacktestError;
use super::indicator::{IndicatorType, DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};

pub const DEFAULT_SHORT: usize = 5;
pub const DEFAULT_MIDDLE: usize = 20;
pub const DEFAULT_LONG: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Crossover,
    Macd,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 2] = [StrategyKind::Crossover, StrategyKind::Macd];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Crossover => "crossover",
            StrategyKind::Macd => "macd",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = BacktestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crossover" | "ema" | "multiple_emas" => Ok(StrategyKind::Crossover),
            "macd" | "momentum" => Ok(StrategyKind::Macd),
            other => Err(BacktestError::config_invalid(
                "strategy",
                "kind",
                format!("unknown strategy '{}' (expected crossover or macd)", other),
            )),
        }
    }
}

/// EMA spans for both strategies. Only the three belonging to the selected
/// strategy are used by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategySpans {
    pub short: usize,
    pub middle: usize,
    pub long: usize,
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for StrategySpans {
    fn default() -> Self {
        StrategySpans {
            short: DEFAULT_SHORT,
            middle: DEFAULT_MIDDLE,
            long: DEFAULT_LONG,
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
        }
    }
}

impl StrategySpans {
    /// Indicators a run of `kind` computes.
    pub fn indicators(&self, kind: StrategyKind) -> Vec<IndicatorType> {
        match kind {
            StrategyKind::Crossover => vec![
                IndicatorType::Ema(self.short),
                IndicatorType::Ema(self.middle),
                IndicatorType::Ema(self.long),
            ],
            StrategyKind::Macd => vec![IndicatorType::Macd {
                fast: self.fast,
                slow: self.slow,
                signal: self.signal,
            }],
        }
    }

    pub fn validate(&self, kind: StrategyKind) -> Result<(), BacktestError> {
        let spans: &[(&str, usize)] = match kind {
            StrategyKind::Crossover => &[
                ("short_span", self.short),
                ("middle_span", self.middle),
                ("long_span", self.long),
            ],
            StrategyKind::Macd => &[
                ("fast_span", self.fast),
                ("slow_span", self.slow),
                ("signal_span", self.signal),
            ],
        };
        for &(name, span) in spans {
            if span == 0 {
                return Err(BacktestError::invalid_parameter(
                    name,
                    "span must be at least 1",
                ));
            }
        }
        Ok(())
    }
}
