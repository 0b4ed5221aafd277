//! Strategy protocol: the contract a decision rule satisfies.
//!
//! A strategy is a pure, stateless mapping from one day's market
//! context to a trading signal. The engine is the sole caller and
//! always passes the pre-trade snapshot for the current day; any state
//! a rule needs must already be on the bar (indicator columns) or in
//! the context (cash/shares/total value).

pub mod rsi_rule;
pub mod ema_pullback;
pub mod hybrid;

pub use ema_pullback::EmaPullbackRule;
pub use hybrid::HybridStrategy;
pub use rsi_rule::RsiRule;

use super::price::PriceBar;

/// Pre-trade snapshot offered to a strategy for one day.
#[derive(Debug, Clone)]
pub struct MarketContext<'a> {
    pub bar: &'a PriceBar,
    pub cash: f64,
    pub shares: f64,
    /// shares * bar.close + cash, computed before the day's trade.
    pub total_value: f64,
}

/// Trading signal emitted by a strategy.
///
/// `amount_percent` is a percentage of the relevant balance: current
/// cash for a buy, current shares for a sell. It is not clamped to 100.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Buy { amount_percent: f64, reason: String },
    Sell { amount_percent: f64, reason: String },
    Hold,
}

pub trait Strategy: std::fmt::Debug {
    fn decide(&self, context: &MarketContext) -> Signal;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug)]
    struct AlwaysHold;

    impl Strategy for AlwaysHold {
        fn decide(&self, _context: &MarketContext) -> Signal {
            Signal::Hold
        }
    }

    #[test]
    fn strategy_is_object_safe() {
        let bar = PriceBar::raw(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            100.0,
            100.0,
            100.0,
            100.0,
        );
        let context = MarketContext {
            bar: &bar,
            cash: 50.0,
            shares: 0.5,
            total_value: 100.0,
        };

        let strategy: Box<dyn Strategy> = Box::new(AlwaysHold);
        assert_eq!(strategy.decide(&context), Signal::Hold);
    }
}
