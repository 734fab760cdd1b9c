//! MACD momentum strategy: buy when the MACD line is above its signal
//! line, sell when it drops below while the close is above the entry.

use tracing::trace;

use super::{Signal, SignalMachine};
use crate::domain::indicator::MacdFrame;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MomentumState {
    #[default]
    Flat,
    Bought {
        entry_price: f64,
    },
}

#[derive(Debug, Clone, Default)]
pub struct MomentumMachine {
    state: MomentumState,
}

impl MomentumMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MomentumState {
        self.state
    }
}

impl SignalMachine for MomentumMachine {
    type Frame = MacdFrame;

    fn step(&mut self, close: f64, frame: &MacdFrame) -> Signal {
        let (next, signal) = match self.state {
            MomentumState::Flat if frame.macd > frame.signal => (
                MomentumState::Bought { entry_price: close },
                Signal::Buy { price: close },
            ),
            MomentumState::Bought { entry_price }
                if frame.macd < frame.signal && close > entry_price =>
            {
                (MomentumState::Flat, Signal::Sell { price: close })
            }
            state => (state, Signal::Hold),
        };

        if next != self.state {
            trace!(from = ?self.state, to = ?next, close, "momentum transition");
        }
        self.state = next;
        signal
    }
}
