//! Bollinger Bands mean-reversion strategy.
//!
//! Bands are a rolling mean of the close plus/minus `std_dev` multiples of
//! the rolling population standard deviation. Same latch pattern as the
//! RSI strategy: go Long once the close drops below the lower band, stay
//! Long until the close rises above the upper band. Flat while the bands
//! are undefined.

use crate::domain::error::SigtraderError;
use crate::domain::frame::{IndicatorFrame, COL_LOWER_BAND, COL_MIDDLE_BAND, COL_UPPER_BAND};
use crate::domain::indicator::{calculate_sma, calculate_stddev};
use crate::domain::ohlcv::Bar;

use super::Signal;

#[derive(Debug, Clone)]
pub struct BollingerStrategy {
    period: usize,
    std_dev: f64,
}

impl BollingerStrategy {
    pub fn new(period: usize, std_dev: f64) -> Result<Self, SigtraderError> {
        if period == 0 {
            return Err(SigtraderError::ParamInvalid {
                strategy: "bollinger".into(),
                param: "period".into(),
                reason: "window must be at least 1".into(),
            });
        }
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(SigtraderError::ParamInvalid {
                strategy: "bollinger".into(),
                param: "std_dev".into(),
                reason: format!("multiplier must be positive, got {}", std_dev),
            });
        }
        Ok(Self { period, std_dev })
    }

    pub fn name(&self) -> String {
        format!("Bollinger Bands ({}, {})", self.period, self.std_dev)
    }

    pub fn calculate_indicators<'a>(&self, bars: &'a [Bar]) -> IndicatorFrame<'a> {
        let middle = calculate_sma(bars, self.period);
        let stddev = calculate_stddev(bars, self.period);

        let upper: Vec<Option<f64>> = middle
            .iter()
            .zip(&stddev)
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => Some(m + self.std_dev * s),
                _ => None,
            })
            .collect();
        let lower: Vec<Option<f64>> = middle
            .iter()
            .zip(&stddev)
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => Some(m - self.std_dev * s),
                _ => None,
            })
            .collect();

        let mut frame = IndicatorFrame::new(bars);
        frame.insert(COL_MIDDLE_BAND, middle);
        frame.insert(COL_UPPER_BAND, upper);
        frame.insert(COL_LOWER_BAND, lower);
        frame
    }

    pub fn generate_signals(&self, frame: &IndicatorFrame<'_>) -> Vec<Signal> {
        let bars = frame.bars();
        let mut latched = false;
        (0..frame.len())
            .map(|i| {
                let lower = frame.value(COL_LOWER_BAND, i);
                let upper = frame.value(COL_UPPER_BAND, i);
                match (lower, upper) {
                    (Some(lower), Some(upper)) => {
                        let close = bars[i].close;
                        if !latched && close < lower {
                            latched = true;
                        } else if latched && close > upper {
                            latched = false;
                        }
                        if latched {
                            Signal::Long
                        } else {
                            Signal::Flat
                        }
                    }
                    _ => {
                        latched = false;
                        Signal::Flat
                    }
                }
            })
            .collect()
    }
}
