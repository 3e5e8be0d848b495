//! Backtest engine: turns a bar series plus a trade-signal column into an
//! equity curve and a trade log.
//!
//! The signal is a per-bar state; the engine trades on transitions between
//! consecutive bars. Entries and exits both execute at the close of the
//! bar on which the transition is observed. Signals are computed from
//! closed bars, so there is no look-ahead. The first bar is compared
//! against an implicit prior Flat state.
//!
//! No randomness and no mutation of inputs: identical inputs always
//! produce identical outputs, and concurrent runs over one shared series
//! need no locking.

use crate::domain::backtest::TradeUnit;
use crate::domain::equity::EquityPoint;
use crate::domain::error::SigtraderError;
use crate::domain::ohlcv::Bar;
use crate::domain::position::{OpenPosition, Trade};
use crate::domain::strategy::Signal;

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub initial_capital: f64,
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
    /// Position still held after the final bar; contributes to
    /// `position_value` but is not counted as a completed trade.
    pub open_position: Option<OpenPosition>,
}

impl BacktestResult {
    pub fn final_equity(&self) -> f64 {
        self.equity_curve
            .last()
            .map(|p| p.total_equity)
            .unwrap_or(self.initial_capital)
    }
}

pub fn run_backtest(
    bars: &[Bar],
    signals: &[Signal],
    initial_capital: f64,
    trade_unit: TradeUnit,
) -> Result<BacktestResult, SigtraderError> {
    if signals.len() != bars.len() {
        return Err(SigtraderError::SignalMismatch {
            bars: bars.len(),
            signals: signals.len(),
        });
    }

    let mut cash = initial_capital;
    let mut open: Option<OpenPosition> = None;
    let mut trades: Vec<Trade> = Vec::new();
    let mut equity_curve: Vec<EquityPoint> = Vec::with_capacity(bars.len());
    let mut prev = Signal::Flat;

    for (bar, &signal) in bars.iter().zip(signals) {
        if open.is_none() && prev == Signal::Flat && signal == Signal::Long {
            let allocation = trade_unit.allocation(cash);
            if allocation > 0.0 {
                let quantity = allocation / bar.close;
                cash -= allocation;
                open = Some(OpenPosition {
                    entry_timestamp: bar.timestamp,
                    entry_price: bar.close,
                    quantity,
                    allocation,
                });
            }
        } else if prev == Signal::Long && signal == Signal::Flat {
            if let Some(lot) = open.take() {
                let proceeds = lot.quantity * bar.close;
                cash += proceeds;
                trades.push(Trade {
                    entry_timestamp: lot.entry_timestamp,
                    entry_price: lot.entry_price,
                    exit_timestamp: bar.timestamp,
                    exit_price: bar.close,
                    quantity: lot.quantity,
                    pnl: proceeds - lot.allocation,
                });
            }
        }

        let position_value = open.as_ref().map(|lot| lot.market_value(bar.close)).unwrap_or(0.0);
        equity_curve.push(EquityPoint::new(bar.timestamp, cash, position_value));
        prev = signal;
    }

    Ok(BacktestResult {
        initial_capital,
        equity_curve,
        trades,
        open_position: open,
    })
}
