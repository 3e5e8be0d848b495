//! Strategy factory.
//!
//! Maps a strategy-type identifier plus a mapping of named numeric
//! parameters to a constructed [`Strategy`]. Unknown identifiers and
//! missing or out-of-range parameters are rejected before any computation
//! starts; parameters are never silently defaulted.

use std::collections::HashMap;

use crate::domain::error::SigtraderError;

use super::{
    BollingerStrategy, BuyAndHold, GoldenCross, MacdStrategy, RsiStrategy, Strategy,
};

/// Supported strategy-type identifiers, with their required parameters.
pub const STRATEGY_TYPES: &[(&str, &[&str])] = &[
    ("buy_and_hold", &[]),
    ("golden_cross", &["short_ma", "long_ma"]),
    ("rsi", &["rsi_period", "oversold", "overbought"]),
    ("bollinger", &["period", "std_dev"]),
    ("macd", &["fast_period", "slow_period", "signal_period"]),
];

pub fn build_strategy(
    strategy_type: &str,
    params: &HashMap<String, f64>,
) -> Result<Strategy, SigtraderError> {
    match strategy_type {
        "buy_and_hold" => Ok(Strategy::BuyAndHold(BuyAndHold::new())),
        "golden_cross" => {
            let short_ma = require_window(strategy_type, params, "short_ma")?;
            let long_ma = require_window(strategy_type, params, "long_ma")?;
            Ok(Strategy::GoldenCross(GoldenCross::new(short_ma, long_ma)?))
        }
        "rsi" => {
            let period = require_window(strategy_type, params, "rsi_period")?;
            let oversold = require_param(strategy_type, params, "oversold")?;
            let overbought = require_param(strategy_type, params, "overbought")?;
            Ok(Strategy::Rsi(RsiStrategy::new(period, oversold, overbought)?))
        }
        "bollinger" => {
            let period = require_window(strategy_type, params, "period")?;
            let std_dev = require_param(strategy_type, params, "std_dev")?;
            Ok(Strategy::Bollinger(BollingerStrategy::new(period, std_dev)?))
        }
        "macd" => {
            let fast = require_window(strategy_type, params, "fast_period")?;
            let slow = require_window(strategy_type, params, "slow_period")?;
            let signal = require_window(strategy_type, params, "signal_period")?;
            Ok(Strategy::Macd(MacdStrategy::new(fast, slow, signal)?))
        }
        other => Err(SigtraderError::UnknownStrategy {
            name: other.to_string(),
            available: STRATEGY_TYPES
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

fn require_param(
    strategy: &str,
    params: &HashMap<String, f64>,
    name: &str,
) -> Result<f64, SigtraderError> {
    params
        .get(name)
        .copied()
        .ok_or_else(|| SigtraderError::ParamMissing {
            strategy: strategy.to_string(),
            param: name.to_string(),
        })
}

/// A lookback window: a whole number, at least 1.
fn require_window(
    strategy: &str,
    params: &HashMap<String, f64>,
    name: &str,
) -> Result<usize, SigtraderError> {
    let value = require_param(strategy, params, name)?;
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 {
        return Err(SigtraderError::ParamInvalid {
            strategy: strategy.to_string(),
            param: name.to_string(),
            reason: format!("window must be a whole number of at least 1, got {}", value),
        });
    }
    Ok(value as usize)
}
