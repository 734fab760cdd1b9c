//! Three-EMA crossover strategy.
//!
//! Rules, checked in this order each day:
//! 1. Flat, middle < long, short < middle: buy, enter `Short`.
//! 2. `Short`, short > middle, close above entry: sell, go flat.
//! 3. Flat, middle > long, short > middle: buy, enter `Long`.
//! 4. `Long`, short < middle, close above entry: sell, go flat.
//!
//! Both entries buy shares; `Short` only names the bearish EMA ordering the
//! position was opened on. Exits never happen at or below the entry price,
//! so a position opened before a sustained decline stays open.

use tracing::trace;

use super::{Signal, SignalMachine};
use crate::domain::indicator::CrossoverFrame;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CrossoverState {
    #[default]
    Flat,
    Long {
        entry_price: f64,
    },
    Short {
        entry_price: f64,
    },
}

#[derive(Debug, Clone, Default)]
pub struct CrossoverMachine {
    state: CrossoverState,
}

impl CrossoverMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CrossoverState {
        self.state
    }
}

impl SignalMachine for CrossoverMachine {
    type Frame = CrossoverFrame;

    fn step(&mut self, close: f64, frame: &CrossoverFrame) -> Signal {
        let CrossoverFrame {
            short,
            middle,
            long,
        } = *frame;

        let (next, signal) = match self.state {
            CrossoverState::Flat if middle < long && short < middle => (
                CrossoverState::Short { entry_price: close },
                Signal::Buy { price: close },
            ),
            CrossoverState::Short { entry_price } if short > middle && close > entry_price => {
                (CrossoverState::Flat, Signal::Sell { price: close })
            }
            CrossoverState::Flat if middle > long && short > middle => (
                CrossoverState::Long { entry_price: close },
                Signal::Buy { price: close },
            ),
            CrossoverState::Long { entry_price } if short < middle && close > entry_price => {
                (CrossoverState::Flat, Signal::Sell { price: close })
            }
            state => (state, Signal::Hold),
        };

        if next != self.state {
            trace!(from = ?self.state, to = ?next, close, "crossover transition");
        }
        self.state = next;
        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(short: f64, middle: f64, long: f64) -> CrossoverFrame {
        CrossoverFrame {
            short,
            middle,
            long,
        }
    }

    #[test]
    fn starts_flat() {
        assert_eq!(CrossoverMachine::new().state(), CrossoverState::Flat);
    }

    #[test]
    fn equal_emas_hold() {
        let mut m = CrossoverMachine::new();
        assert_eq!(m.step(100.0, &frame(100.0, 100.0, 100.0)), Signal::Hold);
        assert_eq!(m.state(), CrossoverState::Flat);
    }

    #[test]
    fn bullish_ordering_enters_long() {
        let mut m = CrossoverMachine::new();
        let signal = m.step(105.0, &frame(104.0, 102.0, 100.0));
        assert_eq!(signal, Signal::Buy { price: 105.0 });
        assert_eq!(m.state(), CrossoverState::Long { entry_price: 105.0 });
    }

    #[test]
    fn bearish_ordering_enters_short_side() {
        let mut m = CrossoverMachine::new();
        let signal = m.step(95.0, &frame(96.0, 98.0, 100.0));
        assert_eq!(signal, Signal::Buy { price: 95.0 });
        assert_eq!(m.state(), CrossoverState::Short { entry_price: 95.0 });
    }

    #[test]
    fn mixed_ordering_holds_flat() {
        let mut m = CrossoverMachine::new();
        assert_eq!(m.step(100.0, &frame(101.0, 99.0, 100.0)), Signal::Hold);
        assert_eq!(m.step(100.0, &frame(99.0, 101.0, 100.0)), Signal::Hold);
        assert_eq!(m.state(), CrossoverState::Flat);
    }

    #[test]
    fn long_exit_requires_reversal_and_profit() {
        let mut m = CrossoverMachine::new();
        m.step(100.0, &frame(104.0, 102.0, 100.0));

        // Reversal at a loss is ignored.
        assert_eq!(m.step(99.0, &frame(101.0, 102.0, 100.0)), Signal::Hold);
        // Profit without reversal holds.
        assert_eq!(m.step(110.0, &frame(108.0, 104.0, 101.0)), Signal::Hold);
        // Reversal at exactly the entry price still holds.
        assert_eq!(m.step(100.0, &frame(103.0, 104.0, 101.0)), Signal::Hold);
        assert!(matches!(m.state(), CrossoverState::Long { .. }));

        assert_eq!(
            m.step(106.0, &frame(103.0, 104.0, 101.0)),
            Signal::Sell { price: 106.0 }
        );
        assert_eq!(m.state(), CrossoverState::Flat);
    }

    #[test]
    fn short_side_exit_requires_reversal_and_profit() {
        let mut m = CrossoverMachine::new();
        m.step(95.0, &frame(96.0, 98.0, 100.0));

        assert_eq!(m.step(94.0, &frame(99.0, 98.0, 100.0)), Signal::Hold);
        assert_eq!(m.step(97.0, &frame(97.0, 98.0, 100.0)), Signal::Hold);
        assert_eq!(
            m.step(97.0, &frame(99.0, 98.0, 100.0)),
            Signal::Sell { price: 97.0 }
        );
        assert_eq!(m.state(), CrossoverState::Flat);
    }

    #[test]
    fn no_reentry_while_in_position() {
        let mut m = CrossoverMachine::new();
        m.step(100.0, &frame(104.0, 102.0, 100.0));
        assert_eq!(m.step(101.0, &frame(105.0, 103.0, 100.0)), Signal::Hold);
        assert_eq!(m.step(90.0, &frame(96.0, 98.0, 100.0)), Signal::Hold);
        assert_eq!(m.state(), CrossoverState::Long { entry_price: 100.0 });
    }

    #[test]
    fn reenters_after_exit() {
        let mut m = CrossoverMachine::new();
        m.step(95.0, &frame(96.0, 98.0, 100.0));
        m.step(97.0, &frame(99.0, 98.0, 100.0));
        let signal = m.step(103.0, &frame(104.0, 102.0, 100.0));
        assert_eq!(signal, Signal::Buy { price: 103.0 });
        assert_eq!(m.state(), CrossoverState::Long { entry_price: 103.0 });
    }

    #[test]
    fn long_position_ignores_short_side_exit_rule() {
        let mut m = CrossoverMachine::new();
        m.step(100.0, &frame(104.0, 102.0, 100.0));
        // short > middle with profit is the short-side exit; a long position stays open.
        assert_eq!(m.step(120.0, &frame(110.0, 105.0, 101.0)), Signal::Hold);
    }
}
