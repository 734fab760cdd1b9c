//! Per-day trading decisions and the state machines that produce them.

pub mod crossover;
pub mod momentum;

pub use crossover::{CrossoverMachine, CrossoverState};
pub use momentum::{MomentumMachine, MomentumState};

/// Decision for one day. Buy and Sell carry the trigger price, which is
/// always that day's close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Buy { price: f64 },
    Sell { price: f64 },
    Hold,
}

impl Signal {
    pub fn buy_price(&self) -> Option<f64> {
        match self {
            Signal::Buy { price } => Some(*price),
            _ => None,
        }
    }

    pub fn sell_price(&self) -> Option<f64> {
        match self {
            Signal::Sell { price } => Some(*price),
            _ => None,
        }
    }

    pub fn is_hold(&self) -> bool {
        matches!(self, Signal::Hold)
    }
}

/// A strategy's decision state machine. One instance drives one run; it is
/// fed every day in order and owns all state carried between days.
pub trait SignalMachine {
    type Frame;

    fn step(&mut self, close: f64, frame: &Self::Frame) -> Signal;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_prices() {
        let buy = Signal::Buy { price: 10.0 };
        let sell = Signal::Sell { price: 12.0 };

        assert_eq!(buy.buy_price(), Some(10.0));
        assert_eq!(buy.sell_price(), None);
        assert_eq!(sell.sell_price(), Some(12.0));
        assert_eq!(sell.buy_price(), None);
        assert_eq!(Signal::Hold.buy_price(), None);
        assert_eq!(Signal::Hold.sell_price(), None);
        assert!(Signal::Hold.is_hold());
        assert!(!buy.is_hold());
    }
}
