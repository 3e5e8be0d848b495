//! Open positions and completed trades.

use chrono::NaiveDateTime;

/// A long lot currently held by the engine.
///
/// `allocation` is the cash committed at entry; it is the cost basis for
/// the trade's realized PnL when the lot closes.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPosition {
    pub entry_timestamp: NaiveDateTime,
    pub entry_price: f64,
    pub quantity: f64,
    pub allocation: f64,
}

impl OpenPosition {
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.market_value(price) - self.allocation
    }
}

/// A completed round trip. Only produced when a long position closes; a
/// position still open at the end of the series never becomes a `Trade`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub entry_timestamp: NaiveDateTime,
    pub entry_price: f64,
    pub exit_timestamp: NaiveDateTime,
    pub exit_price: f64,
    pub quantity: f64,
    pub pnl: f64,
}

impl Trade {
    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn open_position_market_value() {
        let pos = OpenPosition {
            entry_timestamp: ts(1),
            entry_price: 100.0,
            quantity: 10.0,
            allocation: 1000.0,
        };
        assert!((pos.market_value(110.0) - 1100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn open_position_unrealized_pnl() {
        let pos = OpenPosition {
            entry_timestamp: ts(1),
            entry_price: 100.0,
            quantity: 10.0,
            allocation: 1000.0,
        };
        assert!((pos.unrealized_pnl(110.0) - 100.0).abs() < f64::EPSILON);
        assert!((pos.unrealized_pnl(90.0) - (-100.0)).abs() < f64::EPSILON);
        assert!((pos.unrealized_pnl(100.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn trade_win_classification() {
        let trade = Trade {
            entry_timestamp: ts(1),
            entry_price: 100.0,
            exit_timestamp: ts(5),
            exit_price: 110.0,
            quantity: 10.0,
            pnl: 100.0,
        };
        assert!(trade.is_win());

        let breakeven = Trade { pnl: 0.0, ..trade.clone() };
        assert!(!breakeven.is_win());

        let loss = Trade { pnl: -50.0, ..trade };
        assert!(!loss.is_win());
    }
}
