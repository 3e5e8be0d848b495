//! CSV report adapter.
//!
//! Writes three files into the output directory: `equity_curve.csv` (one
//! row per bar), `trades.csv` (completed round trips), and `metrics.csv`
//! (one metric per row). Not-applicable metrics serialize as `n/a` so a
//! downstream reader cannot mistake them for zero.

use std::path::Path;

use crate::domain::engine::BacktestResult;
use crate::domain::error::SigtraderError;
use crate::domain::metrics::Metrics;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn na(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "n/a".to_string(),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        metrics: &Metrics,
        strategy_name: &str,
        output_dir: &Path,
    ) -> Result<(), SigtraderError> {
        std::fs::create_dir_all(output_dir)?;

        let mut equity = csv::Writer::from_path(output_dir.join("equity_curve.csv"))
            .map_err(|e| SigtraderError::Data {
                reason: format!("failed to create equity_curve.csv: {}", e),
            })?;
        equity
            .write_record(["timestamp", "cash", "position_value", "total_equity"])
            .and_then(|_| {
                for point in &result.equity_curve {
                    equity.write_record([
                        point.timestamp.to_string(),
                        point.cash.to_string(),
                        point.position_value.to_string(),
                        point.total_equity.to_string(),
                    ])?;
                }
                equity.flush().map_err(csv::Error::from)
            })
            .map_err(|e| SigtraderError::Data {
                reason: format!("failed to write equity_curve.csv: {}", e),
            })?;

        let mut trades = csv::Writer::from_path(output_dir.join("trades.csv")).map_err(|e| {
            SigtraderError::Data {
                reason: format!("failed to create trades.csv: {}", e),
            }
        })?;
        trades
            .write_record([
                "entry_timestamp",
                "entry_price",
                "exit_timestamp",
                "exit_price",
                "quantity",
                "pnl",
            ])
            .and_then(|_| {
                for trade in &result.trades {
                    trades.write_record([
                        trade.entry_timestamp.to_string(),
                        trade.entry_price.to_string(),
                        trade.exit_timestamp.to_string(),
                        trade.exit_price.to_string(),
                        trade.quantity.to_string(),
                        trade.pnl.to_string(),
                    ])?;
                }
                trades.flush().map_err(csv::Error::from)
            })
            .map_err(|e| SigtraderError::Data {
                reason: format!("failed to write trades.csv: {}", e),
            })?;

        let mut summary = csv::Writer::from_path(output_dir.join("metrics.csv")).map_err(|e| {
            SigtraderError::Data {
                reason: format!("failed to create metrics.csv: {}", e),
            }
        })?;
        let rows: Vec<(&str, String)> = vec![
            ("strategy", strategy_name.to_string()),
            ("initial_capital", result.initial_capital.to_string()),
            ("final_equity", result.final_equity().to_string()),
            ("cumulative_return", metrics.cumulative_return.to_string()),
            ("cagr", na(metrics.cagr)),
            ("max_drawdown", metrics.max_drawdown.to_string()),
            ("sharpe_ratio", na(metrics.sharpe_ratio)),
            ("win_rate", na(metrics.win_rate)),
            ("total_trades", metrics.total_trades.to_string()),
        ];
        summary
            .write_record(["metric", "value"])
            .and_then(|_| {
                for (name, value) in &rows {
                    summary.write_record([*name, value.as_str()])?;
                }
                summary.flush().map_err(csv::Error::from)
            })
            .map_err(|e| SigtraderError::Data {
                reason: format!("failed to write metrics.csv: {}", e),
            })?;

        Ok(())
    }
}
