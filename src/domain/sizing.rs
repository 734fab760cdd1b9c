//! Trade sizing against a fixed nominal budget.

use chrono::NaiveDate;

use super::error::BacktestError;
use super::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TradeSize {
    pub shares_to_buy: u64,
    pub shares_to_sell: u64,
}

/// Converts signals into share quantities. Every buy is sized against the
/// full budget; a sell closes exactly the quantity of the open buy.
#[derive(Debug, Clone)]
pub struct PositionSizer {
    budget: f64,
    open_size: Option<u64>,
}

impl PositionSizer {
    pub fn new(budget: f64) -> Result<Self, BacktestError> {
        if !budget.is_finite() || budget <= 0.0 {
            return Err(BacktestError::invalid_parameter(
                "budget",
                format!("must be positive, got {}", budget),
            ));
        }
        Ok(PositionSizer {
            budget,
            open_size: None,
        })
    }

    /// floor(budget / price)
    pub fn affordable_shares(&self, price: f64) -> u64 {
        (self.budget / price).floor() as u64
    }

    #[cfg(test)]
    pub(crate) fn open_size(&self) -> Option<u64> {
        self.open_size
    }

    pub fn size(&mut self, date: NaiveDate, signal: &Signal) -> Result<TradeSize, BacktestError> {
        match *signal {
            Signal::Buy { price } => {
                if let Some(open) = self.open_size {
                    return Err(BacktestError::InternalConsistency {
                        date,
                        reason: format!("buy while a position of {} shares is open", open),
                    });
                }
                let shares = self.affordable_shares(price);
                self.open_size = Some(shares);
                Ok(TradeSize {
                    shares_to_buy: shares,
                    shares_to_sell: 0,
                })
            }
            Signal::Sell { .. } => {
                let shares =
                    self.open_size
                        .take()
                        .ok_or_else(|| BacktestError::InternalConsistency {
                            date,
                            reason: "sell with no open buy".to_string(),
                        })?;
                Ok(TradeSize {
                    shares_to_buy: 0,
                    shares_to_sell: shares,
                })
            }
            Signal::Hold => Ok(TradeSize::default()),
        }
    }
}
