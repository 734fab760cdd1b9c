//! Holdings, mark-to-market value and realized profit, day by day.

use chrono::NaiveDate;

use super::error::BacktestError;
use super::signal::Signal;
use super::sizing::TradeSize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerEntry {
    pub holding_shares: u64,
    pub mark_value: f64,
    pub realized_profit: f64,
    pub cumulative_total: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PortfolioAccountant {
    holding_shares: u64,
    realized: f64,
}

impl PortfolioAccountant {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn holding_shares(&self) -> u64 {
        self.holding_shares
    }

    /// Realized profit accumulated so far (cash out minus cash in).
    #[cfg(test)]
    pub(crate) fn realized(&self) -> f64 {
        self.realized
    }

    pub fn record(
        &mut self,
        date: NaiveDate,
        close: f64,
        signal: &Signal,
        trade: &TradeSize,
    ) -> Result<LedgerEntry, BacktestError> {
        let holding = (self.holding_shares + trade.shares_to_buy)
            .checked_sub(trade.shares_to_sell)
            .ok_or_else(|| BacktestError::InternalConsistency {
                date,
                reason: format!(
                    "selling {} shares with only {} held",
                    trade.shares_to_sell, self.holding_shares
                ),
            })?;

        let realized_profit = match *signal {
            Signal::Buy { price } => -(trade.shares_to_buy as f64 * price),
            Signal::Sell { price } => trade.shares_to_sell as f64 * price,
            Signal::Hold => 0.0,
        };

        self.holding_shares = holding;
        self.realized += realized_profit;

        let mark_value = holding as f64 * close;
        Ok(LedgerEntry {
            holding_shares: holding,
            mark_value,
            realized_profit,
            cumulative_total: self.realized + mark_value,
        })
    }
}
