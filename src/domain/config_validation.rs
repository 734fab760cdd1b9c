//! Configuration validation.
//!
//! Validates all config fields before any data is read.

use crate::domain::error::BacktestError;
use crate::domain::strategy::StrategyKind;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const SPAN_KEYS: [&str; 6] = [
    "short_span",
    "middle_span",
    "long_span",
    "fast_span",
    "slow_span",
    "signal_span",
];

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    validate_budget(config)?;
    validate_dates(config)?;
    validate_codes(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    validate_kind(config)?;
    validate_spans(config)?;
    Ok(())
}

fn validate_budget(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    let Some(raw) = config.get_string("backtest", "budget") else {
        return Ok(());
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(()),
        _ => Err(BacktestError::config_invalid(
            "backtest",
            "budget",
            "budget must be a positive number",
        )),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    let start = parse_date(config, "start_date")?;
    let end = parse_date(config, "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(BacktestError::config_invalid(
                "backtest",
                "start_date",
                "start_date must be before end_date",
            ));
        }
    }
    Ok(())
}

/// Optional `YYYY-MM-DD` date from the `[backtest]` section.
pub fn parse_date(config: &dyn ConfigPort, field: &str) -> Result<Option<NaiveDate>, BacktestError> {
    match config.get_string("backtest", field) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                BacktestError::config_invalid(
                    "backtest",
                    field,
                    format!("invalid {} format, expected YYYY-MM-DD", field),
                )
            }),
    }
}

fn validate_codes(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    if config.get_list("backtest", "codes").is_empty()
        && config.get_list("backtest", "code").is_empty()
    {
        return Err(BacktestError::ConfigMissing {
            section: "backtest".to_string(),
            key: "codes".to_string(),
        });
    }
    Ok(())
}

fn validate_kind(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    match config.get_string("strategy", "kind") {
        Some(s) => s.parse::<StrategyKind>().map(|_| ()),
        None => Ok(()),
    }
}

fn validate_spans(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    for key in SPAN_KEYS {
        if let Some(raw) = config.get_string("strategy", key) {
            match raw.trim().parse::<usize>() {
                Ok(v) if v >= 1 => {}
                _ => {
                    return Err(BacktestError::config_invalid(
                        "strategy",
                        key,
                        format!("{} must be a whole number of at least 1", key),
                    ));
                }
            }
        }
    }
    Ok(())
}
