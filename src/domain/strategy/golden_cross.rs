//! Golden-cross / death-cross moving average strategy.
//!
//! Two simple moving averages over the close. Long while the short MA is
//! above the long MA; the Flat->Long transition is the classic golden
//! cross entry, Long->Flat the death cross exit. Flat wherever either MA
//! is still warming up.

use crate::domain::error::SigtraderError;
use crate::domain::frame::{IndicatorFrame, COL_SMA_LONG, COL_SMA_SHORT};
use crate::domain::indicator::calculate_sma;
use crate::domain::ohlcv::Bar;

use super::Signal;

#[derive(Debug, Clone)]
pub struct GoldenCross {
    short_ma: usize,
    long_ma: usize,
}

impl GoldenCross {
    pub fn new(short_ma: usize, long_ma: usize) -> Result<Self, SigtraderError> {
        if short_ma == 0 {
            return Err(SigtraderError::ParamInvalid {
                strategy: "golden_cross".into(),
                param: "short_ma".into(),
                reason: "window must be at least 1".into(),
            });
        }
        if long_ma == 0 {
            return Err(SigtraderError::ParamInvalid {
                strategy: "golden_cross".into(),
                param: "long_ma".into(),
                reason: "window must be at least 1".into(),
            });
        }
        if short_ma >= long_ma {
            return Err(SigtraderError::ParamInvalid {
                strategy: "golden_cross".into(),
                param: "short_ma".into(),
                reason: format!("short_ma ({}) must be less than long_ma ({})", short_ma, long_ma),
            });
        }
        Ok(Self { short_ma, long_ma })
    }

    pub fn name(&self) -> String {
        format!("Golden Cross ({}/{})", self.short_ma, self.long_ma)
    }

    pub fn calculate_indicators<'a>(&self, bars: &'a [Bar]) -> IndicatorFrame<'a> {
        let mut frame = IndicatorFrame::new(bars);
        frame.insert(COL_SMA_SHORT, calculate_sma(bars, self.short_ma));
        frame.insert(COL_SMA_LONG, calculate_sma(bars, self.long_ma));
        frame
    }

    pub fn generate_signals(&self, frame: &IndicatorFrame<'_>) -> Vec<Signal> {
        (0..frame.len())
            .map(|i| {
                match (frame.value(COL_SMA_SHORT, i), frame.value(COL_SMA_LONG, i)) {
                    (Some(short), Some(long)) if short > long => Signal::Long,
                    _ => Signal::Flat,
                }
            })
            .collect()
    }
}
