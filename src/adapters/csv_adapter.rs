//! CSV file data adapter.
//!
//! One `{SYMBOL}.csv` per instrument under a base directory, header
//! `timestamp,open,high,low,close,volume`. Timestamps accept either
//! `YYYY-MM-DD HH:MM:SS` (intraday bars) or a bare `YYYY-MM-DD` (daily
//! bars, read as midnight).

use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

use crate::domain::error::SigtraderError;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_all(&self, symbol: &str) -> Result<Vec<Bar>, SigtraderError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| SigtraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| SigtraderError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let timestamp = parse_timestamp(field(&record, row, 0, "timestamp")?)?;
            let open: f64 = parse_number(field(&record, row, 1, "open")?, row, "open")?;
            let high: f64 = parse_number(field(&record, row, 2, "high")?, row, "high")?;
            let low: f64 = parse_number(field(&record, row, 3, "low")?, row, "low")?;
            let close: f64 = parse_number(field(&record, row, 4, "close")?, row, "close")?;
            let volume: i64 = field(&record, row, 5, "volume")?
                .trim()
                .parse()
                .map_err(|e| SigtraderError::Data {
                    reason: format!("row {}: invalid volume value: {}", row + 1, e),
                })?;

            bars.push(Bar {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        Ok(bars)
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    row: usize,
    index: usize,
    name: &str,
) -> Result<&'a str, SigtraderError> {
    record.get(index).ok_or_else(|| SigtraderError::Data {
        reason: format!("row {}: missing {} column", row + 1, name),
    })
}

fn parse_number(value: &str, row: usize, name: &str) -> Result<f64, SigtraderError> {
    value.trim().parse().map_err(|e| SigtraderError::Data {
        reason: format!("row {}: invalid {} value: {}", row + 1, name, e),
    })
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, SigtraderError> {
    let value = value.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
        .map_err(|_| SigtraderError::Data {
            reason: format!("invalid timestamp '{}'", value),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, SigtraderError> {
        let bars = self.read_all(symbol)?;
        Ok(bars
            .into_iter()
            .filter(|b| {
                let date = b.timestamp.date();
                date >= start_date && date <= end_date
            })
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, SigtraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| SigtraderError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SigtraderError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, SigtraderError> {
        let bars = self.read_all(symbol)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.timestamp, last.timestamp, bars.len()))),
            _ => Ok(None),
        }
    }
}
