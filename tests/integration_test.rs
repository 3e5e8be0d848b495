//! Full-pipeline integration tests: strategy -> signals -> engine ->
//! metrics, plus the CSV data adapter feeding the same pipeline.

mod common;

use common::*;
use sigtrader::adapters::csv_adapter::CsvAdapter;
use sigtrader::domain::backtest::{Granularity, TradeUnit};
use sigtrader::domain::engine::run_backtest;
use sigtrader::domain::metrics::Metrics;
use sigtrader::domain::ohlcv::validate_bars;
use sigtrader::domain::strategy::{build_strategy, Signal, Strategy};
use sigtrader::ports::data_port::DataPort;
use std::collections::HashMap;

fn params(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn run_pipeline(
    strategy: &Strategy,
    closes: &[f64],
    initial_capital: f64,
    trade_unit: TradeUnit,
) -> (Vec<Signal>, sigtrader::domain::engine::BacktestResult) {
    let bars = make_bars(closes);
    validate_bars(&bars, "TEST").unwrap();
    let frame = strategy.calculate_indicators(&bars);
    let signals = strategy.generate_signals(&frame);
    let result = run_backtest(&bars, &signals, initial_capital, trade_unit).unwrap();
    (signals, result)
}

mod buy_and_hold_scenarios {
    use super::*;

    #[test]
    fn flat_prices_preserve_capital() {
        // 10 daily bars at a constant 100 with full allocation: equity
        // stays at 1000 the whole way, nothing is applicable to annualize.
        let strategy = build_strategy("buy_and_hold", &params(&[])).unwrap();
        let (signals, result) =
            run_pipeline(&strategy, &[100.0; 10], 1000.0, TradeUnit::Full);

        assert_eq!(signals[0], Signal::Flat);
        assert!(signals[1..].iter().all(|s| s.is_long()));

        assert!((result.final_equity() - 1000.0).abs() < 1e-9);
        for point in &result.equity_curve {
            assert!((point.total_equity - 1000.0).abs() < 1e-9);
        }

        let metrics = Metrics::compute(&result, Granularity::Daily.periods_per_year());
        assert!((metrics.cumulative_return - 0.0).abs() < 1e-12);
        assert!((metrics.max_drawdown - 0.0).abs() < 1e-12);
        assert_eq!(metrics.sharpe_ratio, None, "zero variance has no Sharpe");
        assert_eq!(metrics.win_rate, None, "no completed trades");
        assert_eq!(metrics.total_trades, 0);
    }

    #[test]
    fn entry_on_second_bar_stays_open() {
        let strategy = build_strategy("buy_and_hold", &params(&[])).unwrap();
        let (_, result) = run_pipeline(
            &strategy,
            &[100.0, 110.0, 120.0, 130.0],
            1000.0,
            TradeUnit::Full,
        );

        // One entry at the second bar's close, held to the end: no
        // completed trades, all equity in the position.
        assert_eq!(result.trades.len(), 0);
        let open = result.open_position.as_ref().expect("position held at end");
        assert_eq!(open.entry_timestamp, ts(2));
        assert!((open.entry_price - 110.0).abs() < f64::EPSILON);

        let last = result.equity_curve.last().unwrap();
        assert!((last.cash - 0.0).abs() < 1e-9);
        assert!(
            (last.position_value - (last.total_equity - last.cash)).abs() < 1e-9,
            "final position value is full equity minus residual cash"
        );
        assert!((result.final_equity() - 1000.0 * 130.0 / 110.0).abs() < 1e-9);
    }
}

mod golden_cross_scenarios {
    use super::*;

    #[test]
    fn single_crossover_on_rising_series() {
        // short_ma=2, long_ma=3 over six strictly increasing closes:
        // exactly one Flat->Long transition, and the buy executes at the
        // close of the bar where the crossover is first observable (the
        // first bar with both averages defined). No look-ahead: that close
        // is the same bar the signal flips on.
        let strategy =
            build_strategy("golden_cross", &params(&[("short_ma", 2.0), ("long_ma", 3.0)]))
                .unwrap();
        let closes = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
        let (signals, result) = run_pipeline(&strategy, &closes, 1000.0, TradeUnit::Full);

        let ups = signals
            .windows(2)
            .filter(|w| w[0] == Signal::Flat && w[1] == Signal::Long)
            .count();
        assert_eq!(ups, 1, "exactly one golden cross");
        assert_eq!(
            signals,
            vec![
                Signal::Flat,
                Signal::Flat,
                Signal::Long,
                Signal::Long,
                Signal::Long,
                Signal::Long,
            ]
        );

        let open = result.open_position.as_ref().expect("held to the end");
        assert_eq!(open.entry_timestamp, ts(3));
        assert!((open.entry_price - 30.0).abs() < f64::EPSILON);
        assert!(result.trades.is_empty());
    }

    #[test]
    fn cross_down_closes_the_trade() {
        // Rise then collapse: one complete round trip.
        let strategy =
            build_strategy("golden_cross", &params(&[("short_ma", 2.0), ("long_ma", 3.0)]))
                .unwrap();
        let closes = [10.0, 20.0, 30.0, 40.0, 10.0, 5.0, 4.0];
        let (_, result) = run_pipeline(&strategy, &closes, 1000.0, TradeUnit::Full);

        assert_eq!(result.trades.len(), 1);
        let trade = &result.trades[0];
        assert!((trade.entry_price - 30.0).abs() < f64::EPSILON);
        assert!(trade.exit_timestamp > trade.entry_timestamp);
        assert!(trade.pnl < 0.0, "collapse should realize a loss");
        assert!(result.open_position.is_none());
    }

    #[test]
    fn no_trades_during_warmup() {
        let strategy = build_strategy(
            "golden_cross",
            &params(&[("short_ma", 2.0), ("long_ma", 5.0)]),
        )
        .unwrap();
        // Series ends before the long MA ever fills its window.
        let (signals, result) =
            run_pipeline(&strategy, &[10.0, 20.0, 30.0, 40.0], 1000.0, TradeUnit::Full);

        assert!(signals.iter().all(|s| !s.is_long()));
        assert!(result.trades.is_empty());
        assert!(result.open_position.is_none());
    }
}

mod strategy_pipelines {
    use super::*;

    #[test]
    fn rsi_crash_recovery_round_trip() {
        // Mild drift down to depress RSI below 30, then a strong rally to
        // push it above 70: one full round trip through the latch.
        let mut closes: Vec<f64> = vec![100.0];
        for i in 1..12 {
            closes.push(100.0 - i as f64 * 2.0);
        }
        for i in 0..10 {
            closes.push(78.0 + (i + 1) as f64 * 6.0);
        }
        let strategy = build_strategy(
            "rsi",
            &params(&[("rsi_period", 5.0), ("oversold", 30.0), ("overbought", 70.0)]),
        )
        .unwrap();
        let (signals, result) = run_pipeline(&strategy, &closes, 1000.0, TradeUnit::Full);

        for signal in signals.iter().take(5) {
            assert_eq!(*signal, Signal::Flat, "RSI warm-up must stay flat");
        }
        assert!(
            signals.iter().any(|s| s.is_long()),
            "sell-off should trigger an oversold entry"
        );
        assert_eq!(result.trades.len(), 1, "rally should close the position");
        assert!(result.trades[0].pnl > 0.0);
    }

    #[test]
    fn bollinger_crash_enters_long() {
        let mut closes = vec![100.0; 8];
        closes.push(70.0); // below the lower band
        closes.extend([75.0, 80.0]);
        let strategy =
            build_strategy("bollinger", &params(&[("period", 5.0), ("std_dev", 1.5)])).unwrap();
        let (signals, result) = run_pipeline(&strategy, &closes, 1000.0, TradeUnit::Full);

        assert_eq!(signals[8], Signal::Long, "crash bar should enter");
        let open = result.open_position.as_ref().expect("still holding");
        assert!((open.entry_price - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn macd_uptrend_enters_and_reversal_exits() {
        let mut closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64 * 2.0).collect();
        closes.extend((0..25).map(|i| 148.0 - i as f64 * 2.0));
        let strategy = build_strategy(
            "macd",
            &params(&[
                ("fast_period", 3.0),
                ("slow_period", 6.0),
                ("signal_period", 3.0),
            ]),
        )
        .unwrap();
        let (_, result) = run_pipeline(&strategy, &closes, 1000.0, TradeUnit::Full);

        assert_eq!(result.trades.len(), 1);
        assert!(result.trades[0].pnl > 0.0, "bought the uptrend, sold the turn");
        assert!(result.open_position.is_none());
    }

    #[test]
    fn warmup_bars_never_signal_for_any_strategy() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + ((i * 7) % 13) as f64 - 6.0)
            .collect();
        let bars = make_bars(&closes);

        let cases: Vec<(Strategy, usize)> = vec![
            (
                build_strategy(
                    "golden_cross",
                    &params(&[("short_ma", 3.0), ("long_ma", 8.0)]),
                )
                .unwrap(),
                7,
            ),
            (
                build_strategy(
                    "rsi",
                    &params(&[("rsi_period", 14.0), ("oversold", 30.0), ("overbought", 70.0)]),
                )
                .unwrap(),
                14,
            ),
            (
                build_strategy("bollinger", &params(&[("period", 10.0), ("std_dev", 2.0)]))
                    .unwrap(),
                9,
            ),
            (
                build_strategy(
                    "macd",
                    &params(&[
                        ("fast_period", 12.0),
                        ("slow_period", 26.0),
                        ("signal_period", 9.0),
                    ]),
                )
                .unwrap(),
                26 - 1 + 9 - 1,
            ),
        ];

        for (strategy, warmup) in &cases {
            let frame = strategy.calculate_indicators(&bars);
            let signals = strategy.generate_signals(&frame);
            for (i, signal) in signals.iter().take(*warmup).enumerate() {
                assert_eq!(
                    *signal,
                    Signal::Flat,
                    "{}: warm-up bar {} must be flat",
                    strategy.name(),
                    i
                );
            }
        }
    }
}

mod engine_properties {
    use super::*;

    #[test]
    fn engine_is_idempotent() {
        let strategy =
            build_strategy("golden_cross", &params(&[("short_ma", 2.0), ("long_ma", 3.0)]))
                .unwrap();
        let closes = [10.0, 20.0, 30.0, 25.0, 15.0, 35.0, 45.0, 20.0];
        let bars = make_bars(&closes);
        let frame = strategy.calculate_indicators(&bars);
        let signals = strategy.generate_signals(&frame);

        let a = run_backtest(&bars, &signals, 1000.0, TradeUnit::Full).unwrap();
        let b = run_backtest(&bars, &signals, 1000.0, TradeUnit::Full).unwrap();

        assert_eq!(a.equity_curve, b.equity_curve);
        assert_eq!(a.trades, b.trades);
        assert_eq!(a.open_position, b.open_position);
    }

    #[test]
    fn equity_identity_holds_through_pipeline() {
        let strategy =
            build_strategy("golden_cross", &params(&[("short_ma", 2.0), ("long_ma", 3.0)]))
                .unwrap();
        let closes = [10.0, 20.0, 30.0, 25.0, 15.0, 35.0, 45.0, 20.0, 50.0];
        let (_, result) = run_pipeline(&strategy, &closes, 1000.0, TradeUnit::Fixed(400.0));

        assert_eq!(result.equity_curve.len(), closes.len());
        for point in &result.equity_curve {
            assert!(
                (point.total_equity - (point.cash + point.position_value)).abs() < 1e-9
            );
            assert!(point.total_equity >= 0.0);
        }
    }

    #[test]
    fn inputs_are_not_mutated() {
        let strategy =
            build_strategy("golden_cross", &params(&[("short_ma", 2.0), ("long_ma", 3.0)]))
                .unwrap();
        let bars = make_bars(&[10.0, 20.0, 30.0, 25.0]);
        let bars_before = bars.clone();
        let frame = strategy.calculate_indicators(&bars);
        let signals = strategy.generate_signals(&frame);
        let signals_before = signals.clone();

        run_backtest(&bars, &signals, 1000.0, TradeUnit::Full).unwrap();

        assert_eq!(bars, bars_before);
        assert_eq!(signals, signals_before);
    }
}

mod csv_pipeline {
    use super::*;

    #[test]
    fn csv_file_to_metrics_end_to_end() {
        let dir = tempfile::TempDir::new().unwrap();
        let closes = [10.0, 20.0, 30.0, 40.0, 10.0, 5.0, 4.0];
        std::fs::write(dir.path().join("TSLA.csv"), bars_to_csv(&make_bars(&closes))).unwrap();

        let port = CsvAdapter::new(dir.path().to_path_buf());
        let bars = port
            .fetch_bars(
                "TSLA",
                chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .unwrap();
        assert_eq!(bars.len(), closes.len());
        validate_bars(&bars, "TSLA").unwrap();

        let strategy =
            build_strategy("golden_cross", &params(&[("short_ma", 2.0), ("long_ma", 3.0)]))
                .unwrap();
        let frame = strategy.calculate_indicators(&bars);
        let signals = strategy.generate_signals(&frame);
        let result = run_backtest(&bars, &signals, 1000.0, TradeUnit::Full).unwrap();
        let metrics = Metrics::compute(&result, Granularity::Daily.periods_per_year());

        assert_eq!(metrics.total_trades, 1);
        assert_eq!(metrics.win_rate, Some(0.0), "single losing trade");
        assert!(metrics.cumulative_return < 0.0);
        assert!(metrics.max_drawdown < 0.0);
    }
}
