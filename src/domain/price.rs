//! Daily price points and input validation.

use chrono::NaiveDate;

use super::error::BacktestError;

/// Fewest price points a run accepts; EMA crossings need a previous day.
pub const MIN_PRICE_POINTS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
    pub high: Option<f64>,
    pub low: Option<f64>,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        PricePoint {
            date,
            close,
            high: None,
            low: None,
        }
    }
}

/// Inclusive date window; an unset bound is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// Checks that `points` is usable as backtest input: at least
/// [`MIN_PRICE_POINTS`] entries, strictly increasing dates, and finite
/// positive closes. The series is never reordered.
pub fn validate_series(points: &[PricePoint]) -> Result<(), BacktestError> {
    if points.len() < MIN_PRICE_POINTS {
        return Err(BacktestError::InsufficientData {
            points: points.len(),
            minimum: MIN_PRICE_POINTS,
        });
    }

    for (index, point) in points.iter().enumerate() {
        if !point.close.is_finite() || point.close <= 0.0 {
            return Err(BacktestError::invalid_parameter(
                "close",
                format!(
                    "price on {} must be positive, got {}",
                    point.date, point.close
                ),
            ));
        }
        if index > 0 {
            let previous = points[index - 1].date;
            if point.date <= previous {
                return Err(BacktestError::OutOfOrderInput {
                    index,
                    previous,
                    date: point.date,
                });
            }
        }
    }

    Ok(())
}

/// Close prices in input order.
pub fn closes(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.close).collect()
}
