//! Relative Strength Index with Wilder smoothing.
//!
//! Seed averages are the simple mean of the first `period` gains/losses;
//! later averages are smoothed as avg = (avg*(n-1) + current) / n. The
//! first `period` output slots stay 0 ("not yet available").
//!
//! When avg_loss == 0 the relative strength is pinned at 100, so the
//! output tops out at 100 - 100/101 ≈ 99.0099 rather than exactly 100.
//! Callers depend on that exact value; do not "fix" it to 100.

pub fn calculate_rsi(series: &[f64], period: usize) -> Vec<f64> {
    let mut rsi = vec![0.0; series.len()];
    if period == 0 || series.len() < 2 {
        return rsi;
    }

    let mut gains = Vec::with_capacity(series.len() - 1);
    let mut losses = Vec::with_capacity(series.len() - 1);

    for i in 1..series.len() {
        let diff = series[i] - series[i - 1];
        gains.push(if diff > 0.0 { diff } else { 0.0 });
        losses.push(if diff < 0.0 { -diff } else { 0.0 });
    }

    let mut avg_gain = gains.iter().take(period).sum::<f64>() / period as f64;
    let mut avg_loss = losses.iter().take(period).sum::<f64>() / period as f64;

    for i in period..series.len() {
        let rs = if avg_loss == 0.0 {
            100.0
        } else {
            avg_gain / avg_loss
        };
        rsi[i] = 100.0 - 100.0 / (1.0 + rs);

        // Smooth forward with this index's gain/loss, except after the
        // final output.
        if i < series.len() - 1 {
            avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
            avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        }
    }

    rsi
}
