//! Rolling standard deviation.
//!
//! Population standard deviation (divides by N, not N-1) over n closing
//! prices, matching the convention used for Bollinger Bands.
//! Warmup: first (n-1) bars are undefined.

use crate::domain::ohlcv::Bar;

pub fn calculate_stddev(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; bars.len()];
    }

    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        if i + 1 < period {
            values.push(None);
            continue;
        }

        let window = &bars[i + 1 - period..=i];
        let mean: f64 = window.iter().map(|b| b.close).sum::<f64>() / period as f64;
        let variance: f64 = window
            .iter()
            .map(|b| {
                let diff = b.close - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;

        values.push(Some(variance.sqrt()));
    }

    values
}
