//! RSI mean-reversion strategy.
//!
//! Latching state machine over the RSI column: go Long once RSI drops
//! below the oversold threshold, stay Long until RSI rises above the
//! overbought threshold. Between the thresholds the previous state is
//! held. Flat while the RSI is undefined.

use crate::domain::error::SigtraderError;
use crate::domain::frame::{IndicatorFrame, COL_RSI};
use crate::domain::indicator::calculate_rsi;
use crate::domain::ohlcv::Bar;

use super::Signal;

#[derive(Debug, Clone)]
pub struct RsiStrategy {
    period: usize,
    oversold: f64,
    overbought: f64,
}

impl RsiStrategy {
    pub fn new(period: usize, oversold: f64, overbought: f64) -> Result<Self, SigtraderError> {
        if period == 0 {
            return Err(SigtraderError::ParamInvalid {
                strategy: "rsi".into(),
                param: "rsi_period".into(),
                reason: "window must be at least 1".into(),
            });
        }
        for (param, value) in [("oversold", oversold), ("overbought", overbought)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(SigtraderError::ParamInvalid {
                    strategy: "rsi".into(),
                    param: param.into(),
                    reason: format!("threshold must be between 0 and 100, got {}", value),
                });
            }
        }
        if oversold >= overbought {
            return Err(SigtraderError::ParamInvalid {
                strategy: "rsi".into(),
                param: "oversold".into(),
                reason: format!(
                    "oversold ({}) must be below overbought ({})",
                    oversold, overbought
                ),
            });
        }
        Ok(Self {
            period,
            oversold,
            overbought,
        })
    }

    pub fn name(&self) -> String {
        format!(
            "RSI ({}, {}/{})",
            self.period, self.oversold, self.overbought
        )
    }

    pub fn calculate_indicators<'a>(&self, bars: &'a [Bar]) -> IndicatorFrame<'a> {
        let mut frame = IndicatorFrame::new(bars);
        frame.insert(COL_RSI, calculate_rsi(bars, self.period));
        frame
    }

    pub fn generate_signals(&self, frame: &IndicatorFrame<'_>) -> Vec<Signal> {
        let mut latched = false;
        (0..frame.len())
            .map(|i| match frame.value(COL_RSI, i) {
                None => {
                    latched = false;
                    Signal::Flat
                }
                Some(rsi) => {
                    if !latched && rsi < self.oversold {
                        latched = true;
                    } else if latched && rsi > self.overbought {
                        latched = false;
                    }
                    if latched {
                        Signal::Long
                    } else {
                        Signal::Flat
                    }
                }
            })
            .collect()
    }
}
