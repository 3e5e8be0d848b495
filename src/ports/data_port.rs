//! Bar-data access port trait.
//!
//! The provider owns retrieval and index normalization; the core requires
//! only a flat, time-ordered series per symbol.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::error::SigtraderError;
use crate::domain::ohlcv::Bar;

pub trait DataPort {
    /// Bars for one instrument whose timestamps fall inside the inclusive
    /// date range, sorted by timestamp.
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, SigtraderError>;

    fn list_symbols(&self) -> Result<Vec<String>, SigtraderError>;

    /// (first timestamp, last timestamp, bar count), or `None` when the
    /// symbol has no data.
    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, SigtraderError>;
}
