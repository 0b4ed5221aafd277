//! EMA pullback rule.
//!
//! Only acts while the EMA stack is in bullish alignment
//! (ema20 > ema60 > ema120 > ema200). When aligned, each tier whose EMA
//! sits above the close contributes its configured percentage to one
//! accumulated buy. The rule never sells.

use super::{MarketContext, Signal, Strategy};

#[derive(Debug, Clone)]
pub struct EmaPullbackRule {
    pub buy60_percent: f64,
    pub buy120_percent: f64,
    pub buy200_percent: f64,
}

/// A present-but-zero EMA counts as absent, matching the zero/undefined
/// test the original alignment check performs.
fn ema(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

impl Strategy for EmaPullbackRule {
    fn decide(&self, context: &MarketContext) -> Signal {
        let bar = context.bar;
        let (Some(e20), Some(e60), Some(e120), Some(e200)) = (
            ema(bar.ema20),
            ema(bar.ema60),
            ema(bar.ema120),
            ema(bar.ema200),
        ) else {
            return Signal::Hold;
        };

        if !(e20 > e60 && e60 > e120 && e120 > e200) {
            return Signal::Hold;
        }

        let mut total = 0.0;
        if bar.close < e60 {
            total += self.buy60_percent;
        }
        if bar.close < e120 {
            total += self.buy120_percent;
        }
        if bar.close < e200 {
            total += self.buy200_percent;
        }

        if total > 0.0 {
            Signal::Buy {
                amount_percent: total,
                reason: "ema buy".into(),
            }
        } else {
            Signal::Hold
        }
    }
}
