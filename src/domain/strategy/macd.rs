//! MACD crossover strategy.
//!
//! Long while the MACD line is above its signal line; transitions drive
//! entries and exits. Flat while either line is undefined.

use crate::domain::error::SigtraderError;
use crate::domain::frame::{IndicatorFrame, COL_MACD, COL_MACD_HIST, COL_SIGNAL_LINE};
use crate::domain::indicator::calculate_macd;
use crate::domain::ohlcv::Bar;

use super::Signal;

#[derive(Debug, Clone)]
pub struct MacdStrategy {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl MacdStrategy {
    pub fn new(
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
    ) -> Result<Self, SigtraderError> {
        for (param, value) in [
            ("fast_period", fast_period),
            ("slow_period", slow_period),
            ("signal_period", signal_period),
        ] {
            if value == 0 {
                return Err(SigtraderError::ParamInvalid {
                    strategy: "macd".into(),
                    param: param.into(),
                    reason: "window must be at least 1".into(),
                });
            }
        }
        if fast_period >= slow_period {
            return Err(SigtraderError::ParamInvalid {
                strategy: "macd".into(),
                param: "fast_period".into(),
                reason: format!(
                    "fast_period ({}) must be less than slow_period ({})",
                    fast_period, slow_period
                ),
            });
        }
        Ok(Self {
            fast_period,
            slow_period,
            signal_period,
        })
    }

    pub fn name(&self) -> String {
        format!(
            "MACD ({}/{}/{})",
            self.fast_period, self.slow_period, self.signal_period
        )
    }

    pub fn calculate_indicators<'a>(&self, bars: &'a [Bar]) -> IndicatorFrame<'a> {
        let macd = calculate_macd(bars, self.fast_period, self.slow_period, self.signal_period);

        let mut frame = IndicatorFrame::new(bars);
        frame.insert(COL_MACD, macd.line);
        frame.insert(COL_SIGNAL_LINE, macd.signal);
        frame.insert(COL_MACD_HIST, macd.histogram);
        frame
    }

    pub fn generate_signals(&self, frame: &IndicatorFrame<'_>) -> Vec<Signal> {
        (0..frame.len())
            .map(|i| {
                match (frame.value(COL_MACD, i), frame.value(COL_SIGNAL_LINE, i)) {
                    (Some(line), Some(signal)) if line > signal => Signal::Long,
                    _ => Signal::Flat,
                }
            })
            .collect()
    }
}
