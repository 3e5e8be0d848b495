//! Buy-and-hold benchmark strategy.
//!
//! No indicators. The signal is Flat on the first bar and Long on every
//! bar after it, which manufactures exactly one Flat->Long transition so
//! the engine's generic buy-on-transition logic applies: a strategy that
//! was simply "always long" would never present a transition and the
//! engine would never buy.

use crate::domain::frame::IndicatorFrame;
use crate::domain::ohlcv::Bar;

use super::Signal;

#[derive(Debug, Clone, Default)]
pub struct BuyAndHold;

impl BuyAndHold {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> String {
        "Buy and Hold (Benchmark)".to_string()
    }

    pub fn calculate_indicators<'a>(&self, bars: &'a [Bar]) -> IndicatorFrame<'a> {
        IndicatorFrame::new(bars)
    }

    pub fn generate_signals(&self, frame: &IndicatorFrame<'_>) -> Vec<Signal> {
        (0..frame.len())
            .map(|i| if i == 0 { Signal::Flat } else { Signal::Long })
            .collect()
    }
}
