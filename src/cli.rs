//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestConfig, DEFAULT_BUDGET};
use crate::domain::comparison::{compare_strategies, ComparisonRow};
use crate::domain::config_validation::{
    parse_date, validate_backtest_config, validate_strategy_config,
};
use crate::domain::error::BacktestError;
use crate::domain::metrics::Metrics;
use crate::domain::price::DateRange;
use crate::domain::strategy::{StrategyKind, StrategySpans};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const COMPARISON_FILE: &str = "all_tests.csv";

#[derive(Parser, Debug)]
#[command(
    name = "emabacktest",
    about = "Daily EMA crossover and MACD strategy backtester"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one strategy on one symbol and write its daily ledger
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        code: Option<String>,
        /// crossover or macd; overrides [strategy] kind
        #[arg(short, long)]
        strategy: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare both strategies and buy-and-hold across all configured symbols
    Compare {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols with price files in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Backtest {
            config,
            code,
            strategy,
            output,
        } => run_backtest_command(&config, code.as_deref(), strategy.as_deref(), output.as_deref()),
        Command::Compare { config, output } => run_compare_command(&config, output.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, BacktestError> {
    info!("loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

fn load_validated_config(path: &Path) -> Result<FileConfigAdapter, BacktestError> {
    let adapter = load_config(path)?;
    validate_backtest_config(&adapter)?;
    validate_strategy_config(&adapter)?;
    Ok(adapter)
}

fn run_backtest_command(
    config_path: &Path,
    code_override: Option<&str>,
    strategy_override: Option<&str>,
    output_path: Option<&Path>,
) -> Result<(), BacktestError> {
    let adapter = load_validated_config(config_path)?;
    let bt_config = build_backtest_config(&adapter, strategy_override)?;
    let range = build_date_range(&adapter)?;

    let code = resolve_codes(code_override, &adapter)
        .into_iter()
        .next()
        .ok_or_else(|| BacktestError::ConfigMissing {
            section: "backtest".to_string(),
            key: "codes".to_string(),
        })?;

    let output = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| ledger_output_path(&output_dir(&adapter), bt_config.strategy, &code));

    let data_port = CsvDataAdapter::new(data_dir(&adapter));
    run_backtest_pipeline(
        &data_port,
        &CsvReportAdapter::new(),
        &bt_config,
        &code,
        range,
        &output,
    )?;
    Ok(())
}

fn run_compare_command(config_path: &Path, output_path: Option<&Path>) -> Result<(), BacktestError> {
    let adapter = load_validated_config(config_path)?;
    let bt_config = build_backtest_config(&adapter, None)?;
    let range = build_date_range(&adapter)?;
    let codes = resolve_codes(None, &adapter);

    let output = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output_dir(&adapter).join(COMPARISON_FILE));

    let data_port = CsvDataAdapter::new(data_dir(&adapter));
    let rows = run_compare_pipeline(
        &data_port,
        &CsvReportAdapter::new(),
        &bt_config,
        &codes,
        range,
        &output,
    )?;

    println!("{:<16}{:>16}{:>16}{:>16}", "Symbol", "Crossover", "MACD", "Hold");
    for row in &rows {
        println!(
            "{:<16}{:>16.2}{:>16.2}{:>16.2}",
            row.code, row.crossover_total, row.macd_total, row.buy_and_hold_total
        );
    }
    Ok(())
}

/// Builds the run parameters from `[backtest]` and `[strategy]`. A
/// `strategy_override` takes precedence over `[strategy] kind`.
pub fn build_backtest_config(
    config: &dyn ConfigPort,
    strategy_override: Option<&str>,
) -> Result<BacktestConfig, BacktestError> {
    let kind = strategy_override
        .map(str::to_string)
        .or_else(|| config.get_string("strategy", "kind"));
    let strategy = match kind {
        Some(kind) => kind.parse::<StrategyKind>()?,
        None => StrategyKind::Crossover,
    };

    let defaults = StrategySpans::default();
    let spans = StrategySpans {
        short: read_span(config, "short_span", defaults.short)?,
        middle: read_span(config, "middle_span", defaults.middle)?,
        long: read_span(config, "long_span", defaults.long)?,
        fast: read_span(config, "fast_span", defaults.fast)?,
        slow: read_span(config, "slow_span", defaults.slow)?,
        signal: read_span(config, "signal_span", defaults.signal)?,
    };

    let bt_config = BacktestConfig {
        strategy,
        budget: config.get_double("backtest", "budget", DEFAULT_BUDGET),
        spans,
    };
    bt_config.validate()?;
    Ok(bt_config)
}

fn read_span(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, BacktestError> {
    let raw = config.get_int("strategy", key, default as i64);
    usize::try_from(raw)
        .ok()
        .filter(|&span| span >= 1)
        .ok_or_else(|| {
            BacktestError::config_invalid("strategy", key, format!("{} must be at least 1", key))
        })
}

pub fn build_date_range(config: &dyn ConfigPort) -> Result<DateRange, BacktestError> {
    Ok(DateRange::new(
        parse_date(config, "start_date")?,
        parse_date(config, "end_date")?,
    ))
}

pub fn data_dir(config: &dyn ConfigPort) -> PathBuf {
    config
        .get_string("backtest", "data_dir")
        .filter(|s| !s.trim().is_empty())
        .map(|s| PathBuf::from(s.trim()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

pub fn output_dir(config: &dyn ConfigPort) -> PathBuf {
    config
        .get_string("output", "dir")
        .filter(|s| !s.trim().is_empty())
        .map(|s| PathBuf::from(s.trim()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

/// `<dir>/<strategy>_<CODE>.csv`
pub fn ledger_output_path(dir: &Path, strategy: StrategyKind, code: &str) -> PathBuf {
    dir.join(format!("{}_{}.csv", strategy.name(), code))
}

/// Fetch, run, write the ledger and summarize one symbol.
pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    bt_config: &BacktestConfig,
    code: &str,
    range: DateRange,
    output_path: &Path,
) -> Result<Metrics, BacktestError> {
    let prices = data_port.fetch_prices(code, range)?;
    if prices.is_empty() {
        return Err(BacktestError::NoData {
            code: code.to_string(),
        });
    }

    info!(
        %code,
        strategy = %bt_config.strategy,
        points = prices.len(),
        "running backtest"
    );
    let result = run_backtest(&prices, bt_config)?;
    report_port.write_ledger(&result, output_path)?;
    info!("ledger written to {}", output_path.display());

    let metrics = Metrics::compute(&result);
    log_metrics(code, &metrics);
    Ok(metrics)
}

/// Compare both strategies over `codes` and write the table.
pub fn run_compare_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    bt_config: &BacktestConfig,
    codes: &[String],
    range: DateRange,
    output_path: &Path,
) -> Result<Vec<ComparisonRow>, BacktestError> {
    info!(codes = codes.len(), "comparing strategies");
    let rows = compare_strategies(data_port, codes, range, bt_config.budget, bt_config.spans)?;
    report_port.write_comparison(&rows, output_path)?;
    info!(
        "comparison of {} symbols written to {}",
        rows.len(),
        output_path.display()
    );
    Ok(rows)
}

fn log_metrics(code: &str, metrics: &Metrics) {
    info!(
        %code,
        strategy = %metrics.strategy,
        days = metrics.days,
        buys = metrics.buys,
        sells = metrics.sells,
        open_shares = metrics.open_shares,
        "run complete"
    );
    info!(
        final_total = metrics.final_total,
        best = metrics.best_total,
        worst = metrics.worst_total,
        max_drawdown = metrics.max_drawdown,
        buy_and_hold = metrics.buy_and_hold_total,
        "totals"
    );
}

fn run_validate(config_path: &Path) -> Result<(), BacktestError> {
    let adapter = load_validated_config(config_path)?;
    let bt_config = build_backtest_config(&adapter, None)?;
    build_date_range(&adapter)?;
    info!(
        strategy = %bt_config.strategy,
        budget = bt_config.budget,
        "config validated successfully"
    );

    let data_port = CsvDataAdapter::new(data_dir(&adapter));
    let available = data_port.list_symbols()?;
    for code in resolve_codes(None, &adapter) {
        if available.contains(&code) {
            println!("{}", code);
        } else {
            warn!(%code, "no price file in data directory");
        }
    }
    Ok(())
}

fn run_list_symbols(config_path: &Path) -> Result<(), BacktestError> {
    let adapter = load_config(config_path)?;
    let data_port = CsvDataAdapter::new(data_dir(&adapter));
    let symbols = data_port.list_symbols()?;

    if symbols.is_empty() {
        warn!("no symbols found in {}", data_dir(&adapter).display());
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        info!("{} symbols found", symbols.len());
    }
    Ok(())
}

/// Codes to run: the override if given, else `[backtest] codes`, else
/// `[backtest] code`. Codes keep their case since they name price files.
pub fn resolve_codes(code_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(c) = code_override {
        return vec![c.trim().to_string()];
    }

    let codes = config.get_list("backtest", "codes");
    if codes.is_empty() {
        config.get_list("backtest", "code")
    } else {
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_backtest_subcommand() {
        let cli = Cli::try_parse_from([
            "emabacktest",
            "backtest",
            "--config",
            "bt.ini",
            "--code",
            "IDEA",
            "--strategy",
            "macd",
        ])
        .unwrap();
        match cli.command {
            Command::Backtest {
                config,
                code,
                strategy,
                output,
            } => {
                assert_eq!(config, PathBuf::from("bt.ini"));
                assert_eq!(code.as_deref(), Some("IDEA"));
                assert_eq!(strategy.as_deref(), Some("macd"));
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_list_symbols() {
        let cli = Cli::try_parse_from(["emabacktest", "list-symbols", "-c", "bt.ini"]).unwrap();
        assert!(matches!(cli.command, Command::ListSymbols { .. }));
    }

    #[test]
    fn cli_requires_config() {
        assert!(Cli::try_parse_from(["emabacktest", "compare"]).is_err());
    }

    #[test]
    fn ledger_path_names_strategy_and_code() {
        let path = ledger_output_path(Path::new("out"), StrategyKind::Macd, "IDEA");
        assert_eq!(path, PathBuf::from("out/macd_IDEA.csv"));
    }
}
