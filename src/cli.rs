//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    build_backtest_config, strategy_params, validate_run_config,
};
use crate::domain::engine::run_backtest;
use crate::domain::error::SigtraderError;
use crate::domain::metrics::Metrics;
use crate::domain::ohlcv::validate_bars;
use crate::domain::strategy::{build_strategy, Strategy, STRATEGY_TYPES};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "sigtrader", about = "Signal-driven trading strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Directory for the CSV report (equity curve, trades, metrics)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration without loading data
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the data range for symbol(s) in the configured data directory
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
    /// List supported strategy types and their parameters
    ListStrategies,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            output,
            symbol,
            dry_run,
        } => {
            if dry_run {
                run_validate(&config)
            } else {
                run_backtest_command(&config, output.as_deref(), symbol.as_deref())
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
        Command::ListStrategies => run_list_strategies(),
    }
}

pub fn load_config(path: &std::path::Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SigtraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Construct the strategy named by `[strategy] type` with the section's
/// numeric parameters.
pub fn build_configured_strategy(config: &dyn ConfigPort) -> Result<Strategy, SigtraderError> {
    let strategy_type =
        config
            .get_string("strategy", "type")
            .ok_or_else(|| SigtraderError::ConfigMissing {
                section: "strategy".into(),
                key: "type".into(),
            })?;
    let params = strategy_params(config)?;
    build_strategy(strategy_type.trim(), &params)
}

fn run_backtest_command(
    config_path: &std::path::Path,
    output_dir: Option<&std::path::Path>,
    symbol_override: Option<&str>,
) -> ExitCode {
    // Stage 1: load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_run_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: construct strategy (parameters validated here)
    let strategy = match build_configured_strategy(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Strategy: {}", strategy.name());

    let bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: fetch bars
    let symbol = match symbol_override {
        Some(s) => s.to_uppercase(),
        None => match adapter.get_string("data", "symbol") {
            Some(s) => s.to_uppercase(),
            None => {
                eprintln!("error: symbol is required");
                return ExitCode::from(2);
            }
        },
    };
    let data_path = adapter.get_string("data", "path").unwrap_or_default();
    let data_port = CsvAdapter::new(PathBuf::from(data_path));

    eprintln!(
        "Loading {} bars ({}) from {} to {}",
        symbol,
        bt_config.granularity.label(),
        bt_config.start_date,
        bt_config.end_date,
    );
    let bars = match data_port.fetch_bars(&symbol, bt_config.start_date, bt_config.end_date) {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if let Err(e) = validate_bars(&bars, &symbol) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("  {} bars loaded", bars.len());

    // Stage 4: signals and simulation
    let frame = strategy.calculate_indicators(&bars);
    let signals = strategy.generate_signals(&frame);

    let result = match run_backtest(
        &bars,
        &signals,
        bt_config.initial_capital,
        bt_config.trade_unit,
    ) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: metrics and summary
    let metrics = Metrics::compute(&result, bt_config.granularity.periods_per_year());

    eprintln!("\n=== Results: {} on {} ===", strategy.name(), symbol);
    eprintln!("Initial Capital:  {:.2}", result.initial_capital);
    eprintln!("Final Equity:     {:.2}", result.final_equity());
    eprintln!(
        "Cumulative:       {:.2}%",
        metrics.cumulative_return * 100.0
    );
    eprintln!("CAGR:             {}", fmt_pct(metrics.cagr));
    eprintln!("Max Drawdown:     {:.2}%", metrics.max_drawdown * 100.0);
    eprintln!("Sharpe Ratio:     {}", fmt_ratio(metrics.sharpe_ratio));
    eprintln!("Win Rate:         {}", fmt_pct(metrics.win_rate));
    eprintln!("Total Trades:     {}", metrics.total_trades);
    if let Some(open) = &result.open_position {
        eprintln!(
            "Open Position:    {:.4} units since {} (not counted as a trade)",
            open.quantity, open.entry_timestamp,
        );
    }

    // Stage 6: optional report
    if let Some(dir) = output_dir {
        let report = CsvReportAdapter::new();
        match report.write(&result, &metrics, &strategy.name(), dir) {
            Ok(()) => eprintln!("\nReport written to: {}", dir.display()),
            Err(e) => {
                eprintln!("error: failed to write report: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "n/a".to_string(),
    }
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

fn run_validate(config_path: &std::path::Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_run_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let strategy = match build_configured_strategy(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Strategy: {}", strategy.name());
    eprintln!("Configuration is valid.");
    ExitCode::SUCCESS
}

fn run_info(config_path: &std::path::Path, symbol: Option<&str>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_path = match adapter.get_string("data", "path") {
        Some(p) if !p.trim().is_empty() => p,
        _ => {
            let e = SigtraderError::ConfigMissing {
                section: "data".into(),
                key: "path".into(),
            };
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_port = CsvAdapter::new(PathBuf::from(data_path));

    let symbols: Vec<String> = match symbol {
        Some(s) => vec![s.to_uppercase()],
        None => match data_port.list_symbols() {
            Ok(symbols) => symbols,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    if symbols.is_empty() {
        eprintln!("No symbols found");
        return ExitCode::SUCCESS;
    }

    for symbol in &symbols {
        match data_port.data_range(symbol) {
            Ok(Some((first, last, count))) => {
                println!("{}: {} bars, {} to {}", symbol, count, first, last);
            }
            Ok(None) => eprintln!("{}: no data", symbol),
            Err(e) => eprintln!("error querying {}: {}", symbol, e),
        }
    }
    ExitCode::SUCCESS
}

fn run_list_strategies() -> ExitCode {
    for (name, params) in STRATEGY_TYPES {
        if params.is_empty() {
            println!("{}", name);
        } else {
            println!("{} ({})", name, params.join(", "));
        }
    }
    ExitCode::SUCCESS
}
