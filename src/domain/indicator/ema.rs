//! Exponential Moving Average.
//!
//! k = 2/(n+1); ema[0] = series[0], then ema[i] = series[i]*k + ema[i-1]*(1-k).
//! The seed is the first raw value, not a windowed mean, so every index
//! is defined — there is no warmup gap.

pub fn calculate_ema(series: &[f64], period: usize) -> Vec<f64> {
    let mut ema = Vec::with_capacity(series.len());
    let k = 2.0 / (period as f64 + 1.0);

    for (i, &price) in series.iter().enumerate() {
        if i == 0 {
            ema.push(price);
        } else {
            ema.push(price * k + ema[i - 1] * (1.0 - k));
        }
    }

    ema
}
