//! Result output port trait.

use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::comparison::ComparisonRow;
use crate::domain::error::BacktestError;

/// Port for persisting backtest output.
pub trait ReportPort {
    fn write_ledger(&self, result: &BacktestResult, output_path: &Path)
        -> Result<(), BacktestError>;

    fn write_comparison(
        &self,
        rows: &[ComparisonRow],
        output_path: &Path,
    ) -> Result<(), BacktestError>;
}
