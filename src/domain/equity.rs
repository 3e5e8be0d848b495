//! Equity curve rows.
//!
//! One row per bar across the whole series, whether or not the strategy is
//! in the market. Invariant: `total_equity = cash + position_value` on
//! every row.

use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub timestamp: NaiveDateTime,
    pub cash: f64,
    pub position_value: f64,
    pub total_equity: f64,
}

impl EquityPoint {
    pub fn new(timestamp: NaiveDateTime, cash: f64, position_value: f64) -> Self {
        Self {
            timestamp,
            cash,
            position_value,
            total_equity: cash + position_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn total_is_cash_plus_position() {
        let point = EquityPoint::new(
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            400.0,
            600.0,
        );
        assert!((point.total_equity - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn flat_row_has_zero_position_value() {
        let point = EquityPoint::new(
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            1000.0,
            0.0,
        );
        assert!((point.total_equity - point.cash).abs() < f64::EPSILON);
    }
}
