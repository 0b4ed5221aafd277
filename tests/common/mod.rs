#![allow(dead_code)]

use chrono::{Days, NaiveDate};
pub use signalback::domain::price::PriceBar;
use signalback::domain::strategy::{MarketContext, Signal, Strategy};

pub fn date(day: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(day)
}

pub fn make_bar(day: u64, close: f64) -> PriceBar {
    PriceBar::raw(date(day), close, close, close, close)
}

pub fn make_series(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(i as u64, close))
        .collect()
}

/// Strategy that returns the same signal every day.
#[derive(Debug)]
pub struct FixedSignal(pub Signal);

impl Strategy for FixedSignal {
    fn decide(&self, _context: &MarketContext) -> Signal {
        self.0.clone()
    }
}

#[derive(Debug)]
pub struct AlwaysHold;

impl Strategy for AlwaysHold {
    fn decide(&self, _context: &MarketContext) -> Signal {
        Signal::Hold
    }
}
