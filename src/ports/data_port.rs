//! Price history access port trait.

use crate::domain::error::BacktestError;
use crate::domain::price::{DateRange, PricePoint};

pub trait DataPort {
    /// Daily prices for `code` within `range`, in source order.
    fn fetch_prices(&self, code: &str, range: DateRange) -> Result<Vec<PricePoint>, BacktestError>;

    fn list_symbols(&self) -> Result<Vec<String>, BacktestError>;
}
