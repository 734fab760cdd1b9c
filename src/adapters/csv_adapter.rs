//! CSV file data adapter.

use crate::domain::error::BacktestError;
use crate::domain::price::{DateRange, PricePoint};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

/// Positions of the columns we read, located from the header row.
struct Columns {
    date: usize,
    close: usize,
    high: Option<usize>,
    low: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord, path: &str) -> Result<Self, BacktestError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let required = |name: &str| {
            find(name).ok_or_else(|| BacktestError::DataSource {
                reason: format!("{}: missing {} column", path, name),
            })
        };

        Ok(Columns {
            date: required("date")?,
            close: required("close")?,
            high: find("high"),
            low: find("low"),
        })
    }
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", code))
    }
}

fn parse_price(
    record: &csv::StringRecord,
    column: usize,
    name: &str,
    line: u64,
) -> Result<f64, BacktestError> {
    let raw = record.get(column).ok_or_else(|| BacktestError::DataSource {
        reason: format!("line {}: missing {} value", line, name),
    })?;
    raw.trim()
        .parse()
        .map_err(|e| BacktestError::DataSource {
            reason: format!("line {}: invalid {} value {:?}: {}", line, name, raw, e),
        })
}

fn parse_optional_price(
    record: &csv::StringRecord,
    column: Option<usize>,
    name: &str,
    line: u64,
) -> Result<Option<f64>, BacktestError> {
    let Some(c) = column else {
        return Ok(None);
    };
    match record.get(c) {
        Some(raw) if !raw.trim().is_empty() => parse_price(record, c, name, line).map(Some),
        _ => Ok(None),
    }
}

impl DataPort for CsvDataAdapter {
    fn fetch_prices(&self, code: &str, range: DateRange) -> Result<Vec<PricePoint>, BacktestError> {
        let path = self.csv_path(code);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BacktestError::NoData {
                code: code.to_string(),
            },
            _ => BacktestError::DataSource {
                reason: format!("failed to read {}: {}", path.display(), e),
            },
        })?;

        let display = path.display().to_string();
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| BacktestError::DataSource {
            reason: format!("{}: CSV header error: {}", display, e),
        })?;
        let columns = Columns::locate(headers, &display)?;

        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| BacktestError::DataSource {
                reason: format!("{}: CSV parse error: {}", display, e),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date_str = record
                .get(columns.date)
                .ok_or_else(|| BacktestError::DataSource {
                    reason: format!("line {}: missing date value", line),
                })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                BacktestError::DataSource {
                    reason: format!("line {}: invalid date format {:?}: {}", line, date_str, e),
                }
            })?;

            if !range.contains(date) {
                continue;
            }

            points.push(PricePoint {
                date,
                close: parse_price(&record, columns.close, "close", line)?,
                high: parse_optional_price(&record, columns.high, "high", line)?,
                low: parse_optional_price(&record, columns.low, "low", line)?,
            });
        }

        Ok(points)
    }

    fn list_symbols(&self) -> Result<Vec<String>, BacktestError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| BacktestError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| BacktestError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;

            let path = entry.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                symbols.push(stem.to_string_lossy().into_owned());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
