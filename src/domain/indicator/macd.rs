//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow) of close
//! Signal Line = EMA(signal) of the MACD line
//! Histogram = MACD Line - Signal Line
//!
//! The MACD line is defined once the slow EMA is (slow - 1 bars); the
//! signal line needs a further (signal - 1) defined MACD values, giving a
//! total warmup of slow - 1 + signal - 1 bars.

use crate::domain::indicator::ema::{calculate_ema, ema_over};
use crate::domain::ohlcv::Bar;

#[derive(Debug, Clone)]
pub struct MacdColumns {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub fn calculate_macd(bars: &[Bar], fast: usize, slow: usize, signal_period: usize) -> MacdColumns {
    if fast == 0 || slow == 0 || signal_period == 0 {
        let undefined = vec![None; bars.len()];
        return MacdColumns {
            line: undefined.clone(),
            signal: undefined.clone(),
            histogram: undefined,
        };
    }

    let ema_fast = calculate_ema(bars, fast);
    let ema_slow = calculate_ema(bars, slow);

    let line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let signal = ema_over(&line, signal_period);

    let histogram: Vec<Option<f64>> = line
        .iter()
        .zip(&signal)
        .map(|(l, s)| match (l, s) {
            (Some(l), Some(s)) => Some(l - s),
            _ => None,
        })
        .collect();

    MacdColumns {
        line,
        signal,
        histogram,
    }
}
