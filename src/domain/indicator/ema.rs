//! Exponential Moving Average.
//!
//! k = 2/(n+1), seed with the SMA of the first n closes, then
//! EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) bars are undefined.

use crate::domain::ohlcv::Bar;

pub fn calculate_ema(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    ema_over(&bars.iter().map(|b| Some(b.close)).collect::<Vec<_>>(), period)
}

/// EMA over an already-computed column. Leading `None`s are skipped, so an
/// EMA can be layered on another indicator (the MACD signal line does this).
pub fn ema_over(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let k = 2.0 / (period as f64 + 1.0);
    let mut ema: Option<f64> = None;
    let mut seed_sum = 0.0;
    let mut seed_count = 0usize;

    for value in values {
        match (*value, ema) {
            (None, _) => out.push(None),
            (Some(v), Some(prev)) => {
                let next = v * k + prev * (1.0 - k);
                ema = Some(next);
                out.push(Some(next));
            }
            (Some(v), None) => {
                seed_sum += v;
                seed_count += 1;
                if seed_count == period {
                    let seed = seed_sum / period as f64;
                    ema = Some(seed);
                    out.push(Some(seed));
                } else {
                    out.push(None);
                }
            }
        }
    }

    out
}
