//! Indicator enrichment pass.
//!
//! Computes the EMA family and RSI over the close series and attaches
//! them to each bar. Runs once, upstream of the backtest engine; the
//! engine never recomputes indicators itself.

use super::indicator::{calculate_ema, calculate_rsi, RSI_PERIOD};
use super::price::PriceBar;

/// Attach ema20/60/120/200 and rsi columns to every bar.
///
/// EMA values are defined from index 0. RSI is left absent over its
/// warmup window, where the raw calculator emits 0.
pub fn enrich_bars(bars: Vec<PriceBar>) -> Vec<PriceBar> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let ema20 = calculate_ema(&closes, 20);
    let ema60 = calculate_ema(&closes, 60);
    let ema120 = calculate_ema(&closes, 120);
    let ema200 = calculate_ema(&closes, 200);
    let rsi = calculate_rsi(&closes, RSI_PERIOD);

    bars.into_iter()
        .enumerate()
        .map(|(i, mut bar)| {
            bar.ema20 = Some(ema20[i]);
            bar.ema60 = Some(ema60[i]);
            bar.ema120 = Some(ema120[i]);
            bar.ema200 = Some(ema200[i]);
            bar.rsi = if i < RSI_PERIOD { None } else { Some(rsi[i]) };
            bar
        })
        .collect()
}
