//! CSV report adapter implementing ReportPort.
//!
//! Writes the per-day ledger of one run and the multi-symbol comparison
//! table as plain CSV files.

use std::fs;
use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::comparison::ComparisonRow;
use crate::domain::error::BacktestError;
use crate::domain::indicator::IndicatorFrame;
use crate::ports::report_port::ReportPort;

const COMPARISON_HEADER: [&str; 4] = ["Symbol", "Crossover", "MACD", "Hold"];

fn csv_error(e: csv::Error) -> BacktestError {
    BacktestError::Io(std::io::Error::other(e.to_string()))
}

fn open_writer(output_path: &Path) -> Result<csv::Writer<fs::File>, BacktestError> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(BacktestError::Io)?;
    }
    csv::Writer::from_path(output_path).map_err(csv_error)
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn ledger_header(frame: Option<&IndicatorFrame>) -> Vec<&'static str> {
    let indicators = frame
        .map(|f| f.headers())
        .unwrap_or(["Indicator1", "Indicator2", "Indicator3"]);

    let mut header = vec!["Date", "Close"];
    header.extend(indicators);
    header.extend([
        "Buy",
        "Sell",
        "SharesToBuy",
        "SharesToSell",
        "HoldingShares",
        "MarkValue",
        "RealizedProfit",
        "CumulativeTotal",
    ]);
    header
}

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_ledger(&self, result: &BacktestResult, output_path: &Path) -> Result<(), BacktestError> {
        let mut wtr = open_writer(output_path)?;
        wtr.write_record(ledger_header(result.days.first().map(|d| &d.indicators)))
            .map_err(csv_error)?;

        for day in &result.days {
            let [a, b, c] = day.indicators.values();
            wtr.write_record([
                day.date.format("%Y-%m-%d").to_string(),
                day.close.to_string(),
                a.to_string(),
                b.to_string(),
                c.to_string(),
                optional(day.signal.buy_price()),
                optional(day.signal.sell_price()),
                day.trade.shares_to_buy.to_string(),
                day.trade.shares_to_sell.to_string(),
                day.ledger.holding_shares.to_string(),
                day.ledger.mark_value.to_string(),
                day.ledger.realized_profit.to_string(),
                day.ledger.cumulative_total.to_string(),
            ])
            .map_err(csv_error)?;
        }

        wtr.flush().map_err(BacktestError::Io)?;
        Ok(())
    }

    fn write_comparison(
        &self,
        rows: &[ComparisonRow],
        output_path: &Path,
    ) -> Result<(), BacktestError> {
        let mut wtr = open_writer(output_path)?;
        wtr.write_record(COMPARISON_HEADER).map_err(csv_error)?;

        for row in rows {
            wtr.write_record([
                row.code.clone(),
                row.crossover_total.to_string(),
                row.macd_total.to_string(),
                row.buy_and_hold_total.to_string(),
            ])
            .map_err(csv_error)?;
        }

        wtr.flush().map_err(BacktestError::Io)?;
        Ok(())
    }
}
