#![allow(dead_code)]

use chrono::NaiveDate;
use emabacktest::domain::backtest::BacktestResult;
use emabacktest::domain::comparison::ComparisonRow;
use emabacktest::domain::error::BacktestError;
pub use emabacktest::domain::price::{DateRange, PricePoint};
use emabacktest::ports::data_port::DataPort;
use emabacktest::ports::report_port::ReportPort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
    pub inconsistent: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            inconsistent: HashMap::new(),
        }
    }

    pub fn with_prices(mut self, code: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(code.to_string(), points);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }

    /// Fetching `code` fails with `InternalConsistency`.
    pub fn with_inconsistency(mut self, code: &str, reason: &str) -> Self {
        self.inconsistent
            .insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(&self, code: &str, range: DateRange) -> Result<Vec<PricePoint>, BacktestError> {
        if let Some(reason) = self.inconsistent.get(code) {
            return Err(BacktestError::InternalConsistency {
                date: range.start.unwrap_or_else(|| date(2020, 1, 1)),
                reason: reason.clone(),
            });
        }
        if let Some(reason) = self.errors.get(code) {
            return Err(BacktestError::DataSource {
                reason: reason.clone(),
            });
        }
        match self.data.get(code) {
            Some(points) => Ok(points
                .iter()
                .filter(|p| range.contains(p.date))
                .cloned()
                .collect()),
            None => Err(BacktestError::NoData {
                code: code.to_string(),
            }),
        }
    }

    fn list_symbols(&self) -> Result<Vec<String>, BacktestError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

/// Records every write instead of touching the filesystem.
pub struct MockReportPort {
    pub ledgers: RefCell<Vec<(BacktestResult, PathBuf)>>,
    pub comparisons: RefCell<Vec<(Vec<ComparisonRow>, PathBuf)>>,
}

impl MockReportPort {
    pub fn new() -> Self {
        Self {
            ledgers: RefCell::new(Vec::new()),
            comparisons: RefCell::new(Vec::new()),
        }
    }
}

impl ReportPort for MockReportPort {
    fn write_ledger(&self, result: &BacktestResult, output_path: &Path) -> Result<(), BacktestError> {
        self.ledgers
            .borrow_mut()
            .push((result.clone(), output_path.to_path_buf()));
        Ok(())
    }

    fn write_comparison(
        &self,
        rows: &[ComparisonRow],
        output_path: &Path,
    ) -> Result<(), BacktestError> {
        self.comparisons
            .borrow_mut()
            .push((rows.to_vec(), output_path.to_path_buf()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One point per calendar day starting 2020-01-01.
pub fn series(closes: &[f64]) -> Vec<PricePoint> {
    let start = date(2020, 1, 1);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(start + chrono::Duration::days(i as i64), close))
        .collect()
}

/// 80 days rising linearly from 100 to 200, then 20 days falling to 150.
pub fn rise_then_fall() -> Vec<f64> {
    let rise = (0..80).map(|i| 100.0 + 100.0 * i as f64 / 79.0);
    let fall = (0..20).map(|i| 200.0 - 50.0 * (i + 1) as f64 / 20.0);
    rise.chain(fall).collect()
}

/// Upward drift with a 20-day sine wave on top.
pub fn oscillation() -> Vec<f64> {
    (0..120)
        .map(|i| {
            let i = i as f64;
            100.0 + 0.2 * i + 5.0 * (2.0 * std::f64::consts::PI * i / 20.0).sin()
        })
        .collect()
}

/// One up day, then a steady decline that never regains the entry.
pub fn bump_then_decline() -> Vec<f64> {
    let mut closes = vec![100.0, 101.0];
    closes.extend((1..60).map(|i| 101.0 - 0.5 * i as f64));
    closes
}

/// 30 days falling from 100 to 71, then 39 days rising by 2 from 73.
pub fn decline_then_recovery() -> Vec<f64> {
    let decline = (0..30).map(|i| 100.0 - i as f64);
    let recovery = (1..40).map(|i| 71.0 + 2.0 * i as f64);
    decline.chain(recovery).collect()
}
