//! Performance metrics over a backtest result.
//!
//! Undefined metrics are `None`, never zero: CAGR needs at least a one-day
//! span, Sharpe needs non-zero return variance, win rate needs at least
//! one completed trade. Downstream consumers must be able to tell "not
//! applicable" from a computed zero.

use chrono::NaiveDateTime;

use crate::domain::engine::BacktestResult;
use crate::domain::equity::EquityPoint;

const DAYS_PER_YEAR: f64 = 365.25;
const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// final_equity / initial_capital - 1
    pub cumulative_return: f64,
    /// Annualized growth rate over the bar-timestamp span; `None` when the
    /// span is under one day.
    pub cagr: Option<f64>,
    /// Most negative (equity - running peak) / running peak; 0 when equity
    /// never falls below its running peak. Always <= 0.
    pub max_drawdown: f64,
    /// Timestamp of the drawdown trough, when one exists.
    pub max_drawdown_timestamp: Option<NaiveDateTime>,
    /// Annualized mean/std of per-bar returns; `None` when the return
    /// standard deviation is zero.
    pub sharpe_ratio: Option<f64>,
    /// Winning trades / completed trades; `None` with zero completed trades.
    pub win_rate: Option<f64>,
    /// Completed round trips only; an open position at the end of the
    /// series does not count.
    pub total_trades: usize,
}

impl Metrics {
    pub fn compute(result: &BacktestResult, periods_per_year: f64) -> Self {
        let curve = &result.equity_curve;
        let initial_capital = result.initial_capital;
        let final_equity = result.final_equity();

        let cumulative_return = final_equity / initial_capital - 1.0;
        let cagr = compute_cagr(curve, initial_capital, final_equity);
        let (max_drawdown, max_drawdown_timestamp) = compute_drawdown(curve);
        let sharpe_ratio = compute_sharpe(curve, periods_per_year);

        let total_trades = result.trades.len();
        let win_rate = if total_trades > 0 {
            let wins = result.trades.iter().filter(|t| t.is_win()).count();
            Some(wins as f64 / total_trades as f64)
        } else {
            None
        };

        Metrics {
            cumulative_return,
            cagr,
            max_drawdown,
            max_drawdown_timestamp,
            sharpe_ratio,
            win_rate,
            total_trades,
        }
    }
}

fn compute_cagr(curve: &[EquityPoint], initial_capital: f64, final_equity: f64) -> Option<f64> {
    let first = curve.first()?;
    let last = curve.last()?;

    let span_days = (last.timestamp - first.timestamp).num_seconds() as f64 / SECONDS_PER_DAY;
    if span_days < 1.0 {
        return None;
    }

    Some((final_equity / initial_capital).powf(DAYS_PER_YEAR / span_days) - 1.0)
}

fn compute_drawdown(curve: &[EquityPoint]) -> (f64, Option<NaiveDateTime>) {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;
    let mut trough: Option<NaiveDateTime> = None;

    for point in curve {
        if point.total_equity > peak {
            peak = point.total_equity;
        } else if peak > 0.0 {
            let dd = (point.total_equity - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
                trough = Some(point.timestamp);
            }
        }
    }

    (max_dd, trough)
}

fn compute_sharpe(curve: &[EquityPoint], periods_per_year: f64) -> Option<f64> {
    if curve.len() < 2 {
        return None;
    }

    let returns: Vec<f64> = curve
        .windows(2)
        .map(|w| {
            let prev = w[0].total_equity;
            if prev > 0.0 {
                (w[1].total_equity - prev) / prev
            } else {
                0.0
            }
        })
        .collect();

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 {
        Some(mean / stddev * periods_per_year.sqrt())
    } else {
        None
    }
}
