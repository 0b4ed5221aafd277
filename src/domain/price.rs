//! Daily price bar representation.

use chrono::NaiveDate;

/// One day of price data, optionally enriched with indicator columns.
///
/// Indicator fields are `None` until an enrichment pass fills them in;
/// RSI additionally stays `None` over its warmup window.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub ema20: Option<f64>,
    pub ema60: Option<f64>,
    pub ema120: Option<f64>,
    pub ema200: Option<f64>,
    pub rsi: Option<f64>,
}

impl PriceBar {
    /// A bare bar with no indicator columns attached.
    pub fn raw(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        PriceBar {
            date,
            open,
            high,
            low,
            close,
            ema20: None,
            ema60: None,
            ema120: None,
            ema200: None,
            rsi: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bar_has_no_indicators() {
        let bar = PriceBar::raw(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            100.0,
            110.0,
            90.0,
            105.0,
        );
        assert!(bar.ema20.is_none());
        assert!(bar.ema60.is_none());
        assert!(bar.ema120.is_none());
        assert!(bar.ema200.is_none());
        assert!(bar.rsi.is_none());
        assert!((bar.close - 105.0).abs() < f64::EPSILON);
    }
}
