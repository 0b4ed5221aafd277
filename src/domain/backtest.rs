//! Walk-forward backtest engine.
//!
//! Threads a single `{cash, shares}` state through the filtered price
//! series day by day, dispatching to the active strategy, executing
//! trades against the close, and accumulating the ledger, the equity
//! curve and the running maximum drawdown. Everything is normalized to
//! an initial total value of 100, so results read as index points, not
//! currency.
//!
//! The engine holds no state between invocations; independent runs
//! (e.g. a parameter sweep) can execute concurrently without any
//! coordination.

use chrono::NaiveDate;

use super::error::SignalbackError;
use super::price::PriceBar;
use super::strategy::{MarketContext, Signal, Strategy};

/// Normalized starting total value. An index base, not currency.
pub const INITIAL_VALUE: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct BacktestParams {
    /// Inclusive lower bound on bar dates.
    pub start_date: NaiveDate,
    /// Percentage of the initial value allocated to the asset on day 0.
    pub stock_ratio: f64,
}

/// One row of the audit trail: the initial state or one executed trade.
/// Balance fields hold the state after the row was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    /// "start" for the synthetic opening row, otherwise the strategy's
    /// signal reason ("rsi buy", "ema buy", "rsi+ema buy", "rsi sell").
    pub kind: String,
    pub price: f64,
    /// Index points moved by the trade; 0 for the start row.
    pub amount: f64,
    pub shares: f64,
    pub cash: f64,
    pub total_value: f64,
    /// Post-trade stock allocation in percent.
    pub stock_ratio: f64,
    pub benchmark_value: f64,
}

/// End-of-day snapshot; one per trading day, including day 0.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub total_value: f64,
    pub benchmark_value: f64,
    pub cash_component: f64,
    pub stock_component: f64,
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub final_value: f64,
    pub roi_percent: f64,
    pub max_drawdown_percent: f64,
    /// Equals `ledger.len()`, so the start row counts as one trade.
    /// Long-standing convention; downstream consumers rely on it.
    pub trade_count: usize,
    pub ledger: Vec<LedgerEntry>,
    pub equity_curve: Vec<EquityPoint>,
    /// The filtered bar sequence the run actually walked.
    pub prices: Vec<PriceBar>,
}

impl BacktestResult {
    /// Degenerate outcome for an empty filtered series. Not an error.
    fn empty() -> Self {
        BacktestResult {
            final_value: 0.0,
            roi_percent: 0.0,
            max_drawdown_percent: 0.0,
            trade_count: 0,
            ledger: Vec::new(),
            equity_curve: Vec::new(),
            prices: Vec::new(),
        }
    }
}

/// Run one backtest over `prices` with the given strategy.
///
/// Bars before `params.start_date` are dropped; the remainder is walked
/// in date order. Day 0 seeds the `start` ledger row and is then
/// evaluated again inside the main walk, so a strategy may trade on the
/// very first day.
///
/// Fails fast on a non-finite or non-positive close: silent NaNs must
/// not reach the ledger.
pub fn run_backtest(
    prices: &[PriceBar],
    params: &BacktestParams,
    strategy: &dyn Strategy,
) -> Result<BacktestResult, SignalbackError> {
    let mut filtered: Vec<PriceBar> = prices
        .iter()
        .filter(|bar| bar.date >= params.start_date)
        .cloned()
        .collect();
    filtered.sort_by_key(|bar| bar.date);

    if filtered.is_empty() {
        return Ok(BacktestResult::empty());
    }

    for bar in &filtered {
        if !bar.close.is_finite() || bar.close <= 0.0 {
            return Err(SignalbackError::InvalidBar {
                date: bar.date,
                reason: format!("non-finite or non-positive close {}", bar.close),
            });
        }
    }

    let first = &filtered[0];
    let mut cash = INITIAL_VALUE * (100.0 - params.stock_ratio) / 100.0;
    let mut shares = INITIAL_VALUE * (params.stock_ratio / 100.0) / first.close;

    // Fixed buy-and-hold reference: what a 100% allocation at day 0
    // would have bought, regardless of the configured stock ratio.
    let benchmark_shares = INITIAL_VALUE / first.close;

    let mut ledger = Vec::new();
    let mut equity_curve = Vec::with_capacity(filtered.len());
    let mut peak_value = INITIAL_VALUE;
    let mut max_drawdown = 0.0_f64;

    ledger.push(LedgerEntry {
        date: first.date,
        kind: "start".into(),
        price: first.close,
        amount: 0.0,
        shares,
        cash,
        total_value: INITIAL_VALUE,
        stock_ratio: params.stock_ratio,
        benchmark_value: INITIAL_VALUE,
    });

    for bar in &filtered {
        let price = bar.close;
        let stock_value = shares * price;
        let total_value = stock_value + cash;

        let context = MarketContext {
            bar,
            cash,
            shares,
            total_value,
        };

        match strategy.decide(&context) {
            Signal::Buy {
                amount_percent,
                reason,
            } if cash > 0.0 => {
                let buy_amount = cash * amount_percent / 100.0;
                shares += buy_amount / price;
                cash -= buy_amount;
                ledger.push(trade_entry(
                    bar.date,
                    reason,
                    price,
                    buy_amount,
                    shares,
                    cash,
                    benchmark_shares,
                ));
            }
            Signal::Sell {
                amount_percent,
                reason,
            } if shares > 0.0 => {
                let sell_shares = shares * amount_percent / 100.0;
                let sell_amount = sell_shares * price;
                shares -= sell_shares;
                cash += sell_amount;
                ledger.push(trade_entry(
                    bar.date,
                    reason,
                    price,
                    sell_amount,
                    shares,
                    cash,
                    benchmark_shares,
                ));
            }
            // Hold, or a buy/sell with no balance to act on.
            _ => {}
        }

        let end_of_day = shares * price + cash;
        equity_curve.push(EquityPoint {
            date: bar.date,
            total_value: end_of_day,
            benchmark_value: benchmark_shares * price,
            cash_component: cash,
            stock_component: shares * price,
        });

        if end_of_day > peak_value {
            peak_value = end_of_day;
        }
        let drawdown = (peak_value - end_of_day) / peak_value;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }

    let last = &filtered[filtered.len() - 1];
    let final_value = shares * last.close + cash;
    let roi_percent = (final_value - INITIAL_VALUE) / INITIAL_VALUE * 100.0;

    Ok(BacktestResult {
        final_value,
        roi_percent,
        max_drawdown_percent: max_drawdown * 100.0,
        trade_count: ledger.len(),
        ledger,
        equity_curve,
        prices: filtered,
    })
}

fn trade_entry(
    date: NaiveDate,
    kind: String,
    price: f64,
    amount: f64,
    shares: f64,
    cash: f64,
    benchmark_shares: f64,
) -> LedgerEntry {
    let stock_value = shares * price;
    let total_value = stock_value + cash;
    LedgerEntry {
        date,
        kind,
        price,
        amount,
        shares,
        cash,
        total_value,
        stock_ratio: stock_value / total_value * 100.0,
        benchmark_value: benchmark_shares * price,
    }
}
