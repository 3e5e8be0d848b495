//! Backtest run configuration: capital, trade unit, date range, granularity.

use chrono::NaiveDate;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;
const SESSION_MINUTES: f64 = 390.0;

/// How much cash to commit on each entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TradeUnit {
    /// Invest all available cash.
    Full,
    /// Invest min(amount, available cash).
    Fixed(f64),
}

impl TradeUnit {
    /// Parse the config form: the literal `full` or a positive amount.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("full") {
            return Some(TradeUnit::Full);
        }
        match value.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => Some(TradeUnit::Fixed(amount)),
            _ => None,
        }
    }

    /// Cash to commit given the currently available cash.
    pub fn allocation(&self, available_cash: f64) -> f64 {
        match self {
            TradeUnit::Full => available_cash,
            TradeUnit::Fixed(amount) => amount.min(available_cash),
        }
    }
}

/// Supported bar intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Min1,
    Min5,
    Min15,
    Min30,
    Hour1,
    Daily,
}

impl Granularity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "1m" => Some(Granularity::Min1),
            "5m" => Some(Granularity::Min5),
            "15m" => Some(Granularity::Min15),
            "30m" => Some(Granularity::Min30),
            "1h" => Some(Granularity::Hour1),
            "1d" => Some(Granularity::Daily),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Min1 => "1m",
            Granularity::Min5 => "5m",
            Granularity::Min15 => "15m",
            Granularity::Min30 => "30m",
            Granularity::Hour1 => "1h",
            Granularity::Daily => "1d",
        }
    }

    /// Annualization factor for per-bar returns, assuming 252 trading days
    /// and a 390-minute session for intraday intervals.
    pub fn periods_per_year(&self) -> f64 {
        let bars_per_day = match self {
            Granularity::Min1 => SESSION_MINUTES,
            Granularity::Min5 => SESSION_MINUTES / 5.0,
            Granularity::Min15 => SESSION_MINUTES / 15.0,
            Granularity::Min30 => SESSION_MINUTES / 30.0,
            Granularity::Hour1 => SESSION_MINUTES / 60.0,
            Granularity::Daily => 1.0,
        };
        TRADING_DAYS_PER_YEAR * bars_per_day
    }
}

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub granularity: Granularity,
    pub initial_capital: f64,
    pub trade_unit: TradeUnit,
}
