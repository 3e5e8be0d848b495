#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use sigtrader::domain::ohlcv::Bar;
use sigtrader::domain::strategy::Signal;

pub fn ts(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::days((day - 1) as i64)
}

/// Daily bars, one per close, starting 2024-01-01.
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            timestamp: ts((i + 1) as u32),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000,
        })
        .collect()
}

pub fn signals(states: &[u8]) -> Vec<Signal> {
    states
        .iter()
        .map(|&s| if s == 1 { Signal::Long } else { Signal::Flat })
        .collect()
}

/// Render bars as a data CSV in the adapter's on-disk format.
pub fn bars_to_csv(bars: &[Bar]) -> String {
    let mut out = String::from("timestamp,open,high,low,close,volume\n");
    for bar in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.timestamp.format("%Y-%m-%d %H:%M:%S"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume,
        ));
    }
    out
}
