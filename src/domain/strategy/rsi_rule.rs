//! RSI threshold rule.
//!
//! Buys when RSI is at or below the buy threshold, sells when at or
//! above the sell threshold, holds in between or while RSI is still
//! warming up. Thresholds must not overlap; that is a configuration
//! concern, not enforced here.

use super::{MarketContext, Signal, Strategy};

#[derive(Debug, Clone)]
pub struct RsiRule {
    pub buy_threshold: f64,
    pub buy_amount: f64,
    pub sell_threshold: f64,
    pub sell_amount: f64,
}

impl Strategy for RsiRule {
    fn decide(&self, context: &MarketContext) -> Signal {
        match context.bar.rsi {
            Some(rsi) if rsi <= self.buy_threshold => Signal::Buy {
                amount_percent: self.buy_amount,
                reason: "rsi buy".into(),
            },
            Some(rsi) if rsi >= self.sell_threshold => Signal::Sell {
                amount_percent: self.sell_amount,
                reason: "rsi sell".into(),
            },
            _ => Signal::Hold,
        }
    }
}
