//! Hybrid combinator over an ordered list of rules.
//!
//! Two-priority merge policy:
//! 1. The first-listed rule that sells wins outright; every other
//!    signal is discarded, including buys from later rules.
//! 2. Otherwise all buy amounts accumulate additively. A single buyer
//!    keeps its own reason; multiple buyers get a combined reason built
//!    from their labels ("rsi buy" + "ema buy" → "rsi+ema buy").
//!
//! The accumulated buy percentage is deliberately not clamped: two
//! rules can together ask for more than 100% of current cash, and the
//! engine will spend it, driving cash negative. Downstream consumers
//! rely on the unclamped figure.

use super::{MarketContext, Signal, Strategy};

#[derive(Debug)]
pub struct HybridStrategy {
    rules: Vec<Box<dyn Strategy>>,
}

impl HybridStrategy {
    pub fn new(rules: Vec<Box<dyn Strategy>>) -> Self {
        HybridStrategy { rules }
    }
}

fn combined_reason(reasons: &[String]) -> String {
    let labels: Vec<&str> = reasons
        .iter()
        .map(|r| r.strip_suffix(" buy").unwrap_or(r))
        .collect();
    format!("{} buy", labels.join("+"))
}

impl Strategy for HybridStrategy {
    fn decide(&self, context: &MarketContext) -> Signal {
        let signals: Vec<Signal> = self.rules.iter().map(|r| r.decide(context)).collect();

        for signal in &signals {
            if matches!(signal, Signal::Sell { .. }) {
                return signal.clone();
            }
        }

        let mut total = 0.0;
        let mut reasons = Vec::new();
        for signal in signals {
            if let Signal::Buy {
                amount_percent,
                reason,
            } = signal
            {
                total += amount_percent;
                reasons.push(reason);
            }
        }

        match reasons.as_slice() {
            [] => Signal::Hold,
            [only] => Signal::Buy {
                amount_percent: total,
                reason: only.clone(),
            },
            many => Signal::Buy {
                amount_percent: total,
                reason: combined_reason(many),
            },
        }
    }
}
