//! Plain-text report adapter implementing ReportPort.
//!
//! Renders the summary metrics, the full trade ledger and the tail of
//! the equity curve as a fixed-width text table.

use std::fmt::Write as _;
use std::fs;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::SignalbackError;
use crate::ports::report_port::ReportPort;

const EQUITY_TAIL_ROWS: usize = 10;

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(result: &BacktestResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== Backtest Summary ==");
    let _ = writeln!(out, "final value       {:>12.4}", result.final_value);
    let _ = writeln!(out, "roi               {:>11.4}%", result.roi_percent);
    let _ = writeln!(out, "max drawdown      {:>11.4}%", result.max_drawdown_percent);
    let _ = writeln!(out, "trades            {:>12}", result.trade_count);
    let _ = writeln!(out, "days              {:>12}", result.equity_curve.len());

    let _ = writeln!(out);
    let _ = writeln!(out, "== Ledger ==");
    let _ = writeln!(
        out,
        "{:<12} {:<14} {:>10} {:>10} {:>12} {:>10} {:>10} {:>8} {:>10}",
        "date", "kind", "price", "amount", "shares", "cash", "total", "stock%", "bench"
    );
    for entry in &result.ledger {
        let _ = writeln!(
            out,
            "{:<12} {:<14} {:>10.4} {:>10.4} {:>12.6} {:>10.4} {:>10.4} {:>8.2} {:>10.4}",
            entry.date.to_string(),
            entry.kind,
            entry.price,
            entry.amount,
            entry.shares,
            entry.cash,
            entry.total_value,
            entry.stock_ratio,
            entry.benchmark_value,
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "== Equity (last {} days) ==", EQUITY_TAIL_ROWS);
    let _ = writeln!(
        out,
        "{:<12} {:>10} {:>10} {:>10} {:>10}",
        "date", "total", "bench", "cash", "stock"
    );
    let skip = result.equity_curve.len().saturating_sub(EQUITY_TAIL_ROWS);
    for point in result.equity_curve.iter().skip(skip) {
        let _ = writeln!(
            out,
            "{:<12} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            point.date.to_string(),
            point.total_value,
            point.benchmark_value,
            point.cash_component,
            point.stock_component,
        );
    }

    out
}

impl ReportPort for TextReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), SignalbackError> {
        fs::write(output_path, render(result)).map_err(|e| SignalbackError::Report {
            reason: format!("failed to write {}: {}", output_path, e),
        })
    }
}
