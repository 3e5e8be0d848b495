//! Technical indicator implementations.
//!
//! Each function maps a bar slice to a column of `Option<f64>` with one
//! entry per bar; `None` marks the warm-up region where the indicator is
//! not yet defined. Columns plug directly into
//! [`IndicatorFrame`](crate::domain::frame::IndicatorFrame).

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use ema::calculate_ema;
pub use macd::{calculate_macd, MacdColumns};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stddev::calculate_stddev;
