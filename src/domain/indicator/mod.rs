//! Technical indicator calculators.
//!
//! Both calculators are pure functions over a close-price series and
//! return a vector of the same length as their input. Warmup handling
//! differs: EMA is defined from index 0 (seeded with the first raw
//! value), RSI leaves its first `period` slots at 0.

pub mod ema;
pub mod rsi;

pub use ema::calculate_ema;
pub use rsi::calculate_rsi;

/// Default RSI lookback used by the enrichment step.
pub const RSI_PERIOD: usize = 14;
