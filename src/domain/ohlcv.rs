//! OHLCV bar representation and series validation.
//!
//! A bar series is the immutable input to the whole pipeline: timestamps
//! strictly increasing, no duplicates, all four prices finite and positive.
//! `validate_bars` is run once before any stage touches the series; the
//! core refuses to run on a series that fails it.

use chrono::NaiveDateTime;

use super::error::SigtraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Check the invariants the engine and indicators rely on.
pub fn validate_bars(bars: &[Bar], symbol: &str) -> Result<(), SigtraderError> {
    if bars.is_empty() {
        return Err(SigtraderError::EmptySeries {
            symbol: symbol.to_string(),
        });
    }

    for (i, bar) in bars.iter().enumerate() {
        for (field, value) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            if !value.is_finite() {
                return Err(SigtraderError::InvalidBar {
                    index: i,
                    reason: format!("{} is not a finite number", field),
                });
            }
            if value <= 0.0 {
                return Err(SigtraderError::InvalidBar {
                    index: i,
                    reason: format!("{} must be positive, got {}", field, value),
                });
            }
        }
        if bar.volume < 0 {
            return Err(SigtraderError::InvalidBar {
                index: i,
                reason: format!("volume must be non-negative, got {}", bar.volume),
            });
        }

        if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
            return Err(SigtraderError::NonMonotonic {
                index: i,
                timestamp: bar.timestamp.to_string(),
            });
        }
    }

    Ok(())
}
