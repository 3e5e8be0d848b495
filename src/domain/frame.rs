//! Indicator frame: a bar series augmented with named indicator columns.
//!
//! Each column has exactly one entry per bar; `None` marks the warm-up
//! region where the indicator is not yet defined. Columns are keyed by
//! name so downstream consumers (signal generation, export) can look up
//! whatever the active strategy produced.

use std::collections::BTreeMap;

use super::ohlcv::Bar;

pub const COL_SMA_SHORT: &str = "sma_short";
pub const COL_SMA_LONG: &str = "sma_long";
pub const COL_RSI: &str = "rsi";
pub const COL_MIDDLE_BAND: &str = "middle_band";
pub const COL_UPPER_BAND: &str = "upper_band";
pub const COL_LOWER_BAND: &str = "lower_band";
pub const COL_MACD: &str = "macd";
pub const COL_SIGNAL_LINE: &str = "signal_line";
pub const COL_MACD_HIST: &str = "macd_hist";

#[derive(Debug, Clone)]
pub struct IndicatorFrame<'a> {
    bars: &'a [Bar],
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl<'a> IndicatorFrame<'a> {
    pub fn new(bars: &'a [Bar]) -> Self {
        Self {
            bars,
            columns: BTreeMap::new(),
        }
    }

    pub fn bars(&self) -> &'a [Bar] {
        self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Insert a column. Every column must be aligned one-to-one with the
    /// bar series; a mismatched length is a programming error.
    pub fn insert(&mut self, name: &str, values: Vec<Option<f64>>) {
        assert_eq!(
            values.len(),
            self.bars.len(),
            "column '{}' has {} values for {} bars",
            name,
            values.len(),
            self.bars.len()
        );
        self.columns.insert(name.to_string(), values);
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Value of `name` at `index`; `None` if the column is absent or the
    /// indicator is undefined there.
    pub fn value(&self, name: &str, index: usize) -> Option<f64> {
        self.columns.get(name).and_then(|col| col.get(index).copied().flatten())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}
