//! Exponential Moving Average.
//!
//! α = 2/(span+1), seed with the first input, then
//! EMA[i] = α·x[i] + (1-α)·EMA[i-1]. No warmup: every index is defined.

use crate::domain::error::BacktestError;
use crate::domain::indicator::CrossoverFrame;

pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

pub fn calculate_ema(values: &[f64], span: usize) -> Result<Vec<f64>, BacktestError> {
    if span == 0 {
        return Err(BacktestError::invalid_parameter(
            "span",
            "EMA span must be at least 1",
        ));
    }
    let Some(&seed) = values.first() else {
        return Err(BacktestError::InsufficientData {
            points: 0,
            minimum: 1,
        });
    };

    let alpha = smoothing_factor(span);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = seed;
    out.push(ema);

    for &x in &values[1..] {
        ema = alpha * x + (1.0 - alpha) * ema;
        out.push(ema);
    }

    Ok(out)
}

/// Short/middle/long EMAs of `closes`, one frame per input.
pub fn calculate_ema_triple(
    closes: &[f64],
    short: usize,
    middle: usize,
    long: usize,
) -> Result<Vec<CrossoverFrame>, BacktestError> {
    let short_ema = calculate_ema(closes, short)?;
    let middle_ema = calculate_ema(closes, middle)?;
    let long_ema = calculate_ema(closes, long)?;

    Ok(short_ema
        .into_iter()
        .zip(middle_ema)
        .zip(long_ema)
        .map(|((short, middle), long)| CrossoverFrame {
            short,
            middle,
            long,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ema_span_2_recurrence() {
        let ema = calculate_ema(&[10.0, 20.0, 30.0], 2).unwrap();
        assert_eq!(ema.len(), 3);
        assert_abs_diff_eq!(ema[0], 10.0);
        assert_abs_diff_eq!(ema[1], 16.667, epsilon = 1e-3);
        assert_abs_diff_eq!(ema[2], 25.556, epsilon = 1e-3);
    }

    #[test]
    fn ema_seeds_at_first_value() {
        let ema = calculate_ema(&[42.0, 50.0], 60).unwrap();
        assert_abs_diff_eq!(ema[0], 42.0);
    }

    #[test]
    fn ema_span_1_tracks_input() {
        let values = [10.0, 20.0, 30.0];
        let ema = calculate_ema(&values, 1).unwrap();
        for (e, v) in ema.iter().zip(values) {
            assert_abs_diff_eq!(*e, v);
        }
    }

    #[test]
    fn ema_equal_prices() {
        let ema = calculate_ema(&[100.0; 10], 5).unwrap();
        for v in ema {
            assert_abs_diff_eq!(v, 100.0);
        }
    }

    #[test]
    fn ema_empty_input_fails() {
        let err = calculate_ema(&[], 5).unwrap_err();
        assert!(matches!(err, BacktestError::InsufficientData { points: 0, .. }));
    }

    #[test]
    fn ema_span_0_fails() {
        let err = calculate_ema(&[1.0, 2.0], 0).unwrap_err();
        assert!(matches!(err, BacktestError::InvalidParameter { .. }));
    }

    #[test]
    fn ema_smoothing_factor() {
        assert_abs_diff_eq!(smoothing_factor(10), 2.0 / 11.0);
        assert_abs_diff_eq!(smoothing_factor(2), 2.0 / 3.0);
    }

    #[test]
    fn triple_orders_fast_above_slow_on_rise() {
        let frames = calculate_ema_triple(&[100.0, 110.0], 5, 20, 60).unwrap();
        assert_eq!(frames.len(), 2);
        assert_abs_diff_eq!(frames[0].short, frames[0].long);
        assert!(frames[1].short > frames[1].middle);
        assert!(frames[1].middle > frames[1].long);
    }
}
