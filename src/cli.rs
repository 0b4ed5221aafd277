//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_adapter::JsonAdapter;
use crate::adapters::text_report_adapter::{self, TextReportAdapter};
use crate::domain::backtest::{run_backtest, BacktestParams};
use crate::domain::config_validation::{
    validate_config, DEFAULT_EMA_BUY120, DEFAULT_EMA_BUY200, DEFAULT_EMA_BUY60,
    DEFAULT_RSI_BUY_AMOUNT, DEFAULT_RSI_BUY_THRESHOLD, DEFAULT_RSI_SELL_AMOUNT,
    DEFAULT_RSI_SELL_THRESHOLD, DEFAULT_STOCK_RATIO,
};
use crate::domain::enrich::enrich_bars;
use crate::domain::error::SignalbackError;
use crate::domain::price::PriceBar;
use crate::domain::strategy::{EmaPullbackRule, HybridStrategy, RsiRule, Strategy};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "signalback", about = "Rule-based allocation backtester")]
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
        /// Price data file (.csv raw OHLC, or .json enriched cache)
        #[arg(short, long)]
        data: PathBuf,
        /// Write the full text report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show date range and bar count of a data file
    Info {
        #[arg(short, long)]
        data: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data,
            output,
        } => run_backtest_cmd(&config, &data, output.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::Info { data } => run_info(&data),
    }
}

fn fail(err: &SignalbackError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

fn load_config(path: &Path) -> Result<FileConfigAdapter, SignalbackError> {
    FileConfigAdapter::from_file(path).map_err(|e| SignalbackError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Pick the adapter by file extension: `.json` means the enriched
/// cache format, anything else is treated as raw OHLC CSV.
fn make_data_port(path: &Path) -> Box<dyn DataPort> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Box::new(JsonAdapter::new(path.to_path_buf())),
        _ => Box::new(CsvAdapter::new(path.to_path_buf())),
    }
}

fn load_bars(path: &Path) -> Result<Vec<PriceBar>, SignalbackError> {
    let bars = make_data_port(path).load_prices()?;
    // Raw input has no indicator columns yet; the cache format already
    // carries them.
    if bars.iter().any(|b| b.ema20.is_none()) {
        Ok(enrich_bars(bars))
    } else {
        Ok(bars)
    }
}

pub fn build_params(config: &dyn ConfigPort) -> Result<BacktestParams, SignalbackError> {
    let raw = config.get_string("backtest", "start_date").ok_or_else(|| {
        SignalbackError::ConfigMissing {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
        }
    })?;
    let start_date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
        SignalbackError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: format!("not a date: {}", e),
        }
    })?;

    Ok(BacktestParams {
        start_date,
        stock_ratio: config.get_double("backtest", "stock_ratio", DEFAULT_STOCK_RATIO),
    })
}

pub fn build_strategy(config: &dyn ConfigPort) -> Result<Box<dyn Strategy>, SignalbackError> {
    let mode = config
        .get_string("strategy", "mode")
        .unwrap_or_else(|| "hybrid".to_string());

    let rsi = RsiRule {
        buy_threshold: config.get_double("rsi", "buy_threshold", DEFAULT_RSI_BUY_THRESHOLD),
        buy_amount: config.get_double("rsi", "buy_amount", DEFAULT_RSI_BUY_AMOUNT),
        sell_threshold: config.get_double("rsi", "sell_threshold", DEFAULT_RSI_SELL_THRESHOLD),
        sell_amount: config.get_double("rsi", "sell_amount", DEFAULT_RSI_SELL_AMOUNT),
    };
    let ema = EmaPullbackRule {
        buy60_percent: config.get_double("ema", "buy60_percent", DEFAULT_EMA_BUY60),
        buy120_percent: config.get_double("ema", "buy120_percent", DEFAULT_EMA_BUY120),
        buy200_percent: config.get_double("ema", "buy200_percent", DEFAULT_EMA_BUY200),
    };

    match mode.as_str() {
        "rsi" => Ok(Box::new(rsi)),
        "ema" => Ok(Box::new(ema)),
        "hybrid" => Ok(Box::new(HybridStrategy::new(vec![
            Box::new(rsi),
            Box::new(ema),
        ]))),
        other => Err(SignalbackError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "mode".to_string(),
            reason: format!("unknown mode '{}', expected rsi, ema or hybrid", other),
        }),
    }
}

fn run_backtest_cmd(config_path: &Path, data_path: &Path, output: Option<&Path>) -> ExitCode {
    let result = (|| {
        let config = load_config(config_path)?;
        validate_config(&config)?;

        let params = build_params(&config)?;
        let strategy = build_strategy(&config)?;
        let bars = load_bars(data_path)?;

        run_backtest(&bars, &params, strategy.as_ref())
    })();

    match result {
        Ok(result) => {
            if let Some(path) = output {
                let adapter = TextReportAdapter::new();
                if let Err(err) = adapter.write(&result, &path.display().to_string()) {
                    return fail(&err);
                }
                println!(
                    "final {:.4}  roi {:.2}%  mdd {:.2}%  trades {}  report {}",
                    result.final_value,
                    result.roi_percent,
                    result.max_drawdown_percent,
                    result.trade_count,
                    path.display()
                );
            } else {
                print!("{}", text_report_adapter::render(&result));
            }
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    let result = (|| {
        let config = load_config(config_path)?;
        validate_config(&config)?;
        build_params(&config)?;
        build_strategy(&config).map(|_| ())
    })();

    match result {
        Ok(()) => {
            println!("{}: ok", config_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}

fn run_info(data_path: &Path) -> ExitCode {
    match load_bars(data_path) {
        Ok(bars) => {
            match (bars.first(), bars.last()) {
                (Some(first), Some(last)) => {
                    println!(
                        "{}: {} bars, {} to {}",
                        data_path.display(),
                        bars.len(),
                        first.date,
                        last.date
                    );
                }
                _ => println!("{}: no bars", data_path.display()),
            }
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}
