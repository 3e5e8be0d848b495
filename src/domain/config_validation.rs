//! Configuration validation.
//!
//! All run-config fields are checked eagerly, before any data is loaded or
//! any computation starts; strategy parameters are validated separately by
//! the factory when the strategy is constructed.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::domain::backtest::{BacktestConfig, Granularity, TradeUnit};
use crate::domain::error::SigtraderError;
use crate::ports::config_port::ConfigPort;

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    build_backtest_config(config)?;
    validate_data_section(config)?;
    validate_strategy_section(config)?;
    Ok(())
}

/// Build the run configuration, rejecting missing or out-of-range values.
pub fn build_backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, SigtraderError> {
    let initial_capital = config.get_double("backtest", "initial_capital", 0.0);
    if initial_capital <= 0.0 {
        return Err(SigtraderError::ConfigInvalid {
            section: "backtest".into(),
            key: "initial_capital".into(),
            reason: "initial_capital must be positive".into(),
        });
    }

    let trade_unit = match config.get_string("backtest", "trade_unit") {
        None => TradeUnit::Full,
        Some(raw) => TradeUnit::parse(&raw).ok_or_else(|| SigtraderError::ConfigInvalid {
            section: "backtest".into(),
            key: "trade_unit".into(),
            reason: format!("expected 'full' or a positive amount, got '{}'", raw),
        })?,
    };

    let start_date = parse_date(config, "start_date")?;
    let end_date = parse_date(config, "end_date")?;
    if start_date >= end_date {
        return Err(SigtraderError::ConfigInvalid {
            section: "backtest".into(),
            key: "start_date".into(),
            reason: "start_date must be before end_date".into(),
        });
    }

    let granularity = match config.get_string("backtest", "granularity") {
        None => Granularity::Daily,
        Some(raw) => Granularity::parse(&raw).ok_or_else(|| SigtraderError::ConfigInvalid {
            section: "backtest".into(),
            key: "granularity".into(),
            reason: format!("expected one of 1m, 5m, 15m, 30m, 1h, 1d, got '{}'", raw),
        })?,
    };

    Ok(BacktestConfig {
        start_date,
        end_date,
        granularity,
        initial_capital,
        trade_unit,
    })
}

fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, SigtraderError> {
    let value = config
        .get_string("backtest", key)
        .ok_or_else(|| SigtraderError::ConfigMissing {
            section: "backtest".into(),
            key: key.into(),
        })?;

    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| SigtraderError::ConfigInvalid {
        section: "backtest".into(),
        key: key.into(),
        reason: format!("invalid {} format, expected YYYY-MM-DD", key),
    })
}

fn validate_data_section(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    for key in ["path", "symbol"] {
        match config.get_string("data", key) {
            Some(s) if !s.trim().is_empty() => {}
            _ => {
                return Err(SigtraderError::ConfigMissing {
                    section: "data".into(),
                    key: key.into(),
                })
            }
        }
    }
    Ok(())
}

fn validate_strategy_section(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    match config.get_string("strategy", "type") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(SigtraderError::ConfigMissing {
            section: "strategy".into(),
            key: "type".into(),
        }),
    }
}

/// Collect the numeric parameter mapping from the `[strategy]` section.
/// The `type` key is the variant selector, not a parameter; non-numeric
/// values are a configuration error.
pub fn strategy_params(config: &dyn ConfigPort) -> Result<HashMap<String, f64>, SigtraderError> {
    let mut params = HashMap::new();

    for key in config.section_keys("strategy") {
        if key == "type" {
            continue;
        }
        let raw = match config.get_string("strategy", &key) {
            Some(v) => v,
            None => continue,
        };
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| SigtraderError::ConfigInvalid {
                section: "strategy".into(),
                key: key.clone(),
                reason: format!("expected a number, got '{}'", raw),
            })?;
        params.insert(key, value);
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    fn valid_config() -> FileConfigAdapter {
        make_config(
            r#"
[data]
path = /tmp/data
symbol = TSLA

[backtest]
initial_capital = 10000
trade_unit = full
start_date = 2024-01-01
end_date = 2024-12-31
granularity = 1d

[strategy]
type = golden_cross
short_ma = 20
long_ma = 60
"#,
        )
    }

    #[test]
    fn valid_config_passes() {
        assert!(validate_run_config(&valid_config()).is_ok());
    }

    #[test]
    fn built_config_fields() {
        let config = build_backtest_config(&valid_config()).unwrap();
        assert!((config.initial_capital - 10000.0).abs() < f64::EPSILON);
        assert_eq!(config.trade_unit, TradeUnit::Full);
        assert_eq!(config.granularity, Granularity::Daily);
        assert_eq!(
            config.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn missing_capital_fails() {
        let config = make_config(
            "[backtest]\nstart_date = 2024-01-01\nend_date = 2024-12-31\n",
        );
        let err = build_backtest_config(&config).unwrap_err();
        assert!(
            matches!(err, SigtraderError::ConfigInvalid { key, .. } if key == "initial_capital")
        );
    }

    #[test]
    fn negative_capital_fails() {
        let config = make_config(
            "[backtest]\ninitial_capital = -100\nstart_date = 2024-01-01\nend_date = 2024-12-31\n",
        );
        let err = build_backtest_config(&config).unwrap_err();
        assert!(
            matches!(err, SigtraderError::ConfigInvalid { key, .. } if key == "initial_capital")
        );
    }

    #[test]
    fn trade_unit_defaults_to_full() {
        let config = make_config(
            "[backtest]\ninitial_capital = 1000\nstart_date = 2024-01-01\nend_date = 2024-12-31\n",
        );
        let built = build_backtest_config(&config).unwrap();
        assert_eq!(built.trade_unit, TradeUnit::Full);
    }

    #[test]
    fn fixed_trade_unit_parsed() {
        let config = make_config(
            "[backtest]\ninitial_capital = 1000\ntrade_unit = 250\nstart_date = 2024-01-01\nend_date = 2024-12-31\n",
        );
        let built = build_backtest_config(&config).unwrap();
        assert_eq!(built.trade_unit, TradeUnit::Fixed(250.0));
    }

    #[test]
    fn zero_trade_unit_fails() {
        let config = make_config(
            "[backtest]\ninitial_capital = 1000\ntrade_unit = 0\nstart_date = 2024-01-01\nend_date = 2024-12-31\n",
        );
        let err = build_backtest_config(&config).unwrap_err();
        assert!(matches!(err, SigtraderError::ConfigInvalid { key, .. } if key == "trade_unit"));
    }

    #[test]
    fn bad_date_format_fails() {
        let config = make_config(
            "[backtest]\ninitial_capital = 1000\nstart_date = 2024/01/01\nend_date = 2024-12-31\n",
        );
        let err = build_backtest_config(&config).unwrap_err();
        assert!(matches!(err, SigtraderError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn missing_end_date_fails() {
        let config =
            make_config("[backtest]\ninitial_capital = 1000\nstart_date = 2024-01-01\n");
        let err = build_backtest_config(&config).unwrap_err();
        assert!(matches!(err, SigtraderError::ConfigMissing { key, .. } if key == "end_date"));
    }

    #[test]
    fn start_after_end_fails() {
        let config = make_config(
            "[backtest]\ninitial_capital = 1000\nstart_date = 2024-12-31\nend_date = 2024-01-01\n",
        );
        let err = build_backtest_config(&config).unwrap_err();
        assert!(matches!(err, SigtraderError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn unknown_granularity_fails() {
        let config = make_config(
            "[backtest]\ninitial_capital = 1000\nstart_date = 2024-01-01\nend_date = 2024-12-31\ngranularity = 2h\n",
        );
        let err = build_backtest_config(&config).unwrap_err();
        assert!(matches!(err, SigtraderError::ConfigInvalid { key, .. } if key == "granularity"));
    }

    #[test]
    fn intraday_granularity_accepted() {
        let config = make_config(
            "[backtest]\ninitial_capital = 1000\nstart_date = 2024-01-01\nend_date = 2024-12-31\ngranularity = 5m\n",
        );
        let built = build_backtest_config(&config).unwrap();
        assert_eq!(built.granularity, Granularity::Min5);
    }

    #[test]
    fn missing_data_path_fails() {
        let config = make_config(
            r#"
[data]
symbol = TSLA

[backtest]
initial_capital = 1000
start_date = 2024-01-01
end_date = 2024-12-31

[strategy]
type = buy_and_hold
"#,
        );
        let err = validate_run_config(&config).unwrap_err();
        assert!(matches!(
            err,
            SigtraderError::ConfigMissing { section, key } if section == "data" && key == "path"
        ));
    }

    #[test]
    fn missing_strategy_type_fails() {
        let config = make_config(
            r#"
[data]
path = /tmp/data
symbol = TSLA

[backtest]
initial_capital = 1000
start_date = 2024-01-01
end_date = 2024-12-31
"#,
        );
        let err = validate_run_config(&config).unwrap_err();
        assert!(matches!(
            err,
            SigtraderError::ConfigMissing { section, key } if section == "strategy" && key == "type"
        ));
    }

    #[test]
    fn strategy_params_collects_numeric_keys() {
        let params = strategy_params(&valid_config()).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("short_ma"), Some(&20.0));
        assert_eq!(params.get("long_ma"), Some(&60.0));
        assert!(!params.contains_key("type"));
    }

    #[test]
    fn strategy_params_rejects_non_numeric() {
        let config = make_config("[strategy]\ntype = rsi\noversold = low\n");
        let err = strategy_params(&config).unwrap_err();
        assert!(matches!(err, SigtraderError::ConfigInvalid { key, .. } if key == "oversold"));
    }

    #[test]
    fn strategy_params_empty_section() {
        let config = make_config("[strategy]\ntype = buy_and_hold\n");
        let params = strategy_params(&config).unwrap();
        assert!(params.is_empty());
    }
}
