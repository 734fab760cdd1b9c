//! Core domain types and logic: indicators, signal state machines, sizing,
//! accounting and the backtest pipeline that chains them.

pub mod price;
pub mod indicator;
pub mod signal;
pub mod sizing;
pub mod ledger;
pub mod strategy;
pub mod backtest;
pub mod metrics;
pub mod comparison;
pub mod config_validation;
pub mod error;
