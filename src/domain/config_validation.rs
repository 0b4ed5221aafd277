//! Configuration validation.
//!
//! Validates every field a run depends on before any data is loaded.
//! Defaults mirror the original parameter sets: RSI 25/75 thresholds,
//! EMA pullback tiers 10/15/20, stock ratio 50, hybrid mode.

use crate::domain::error::SignalbackError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DEFAULT_STOCK_RATIO: f64 = 50.0;
pub const DEFAULT_RSI_BUY_THRESHOLD: f64 = 25.0;
pub const DEFAULT_RSI_SELL_THRESHOLD: f64 = 75.0;
pub const DEFAULT_RSI_BUY_AMOUNT: f64 = 30.0;
pub const DEFAULT_RSI_SELL_AMOUNT: f64 = 30.0;
pub const DEFAULT_EMA_BUY60: f64 = 10.0;
pub const DEFAULT_EMA_BUY120: f64 = 15.0;
pub const DEFAULT_EMA_BUY200: f64 = 20.0;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), SignalbackError> {
    validate_start_date(config)?;
    validate_stock_ratio(config)?;
    validate_mode(config)?;
    validate_rsi_params(config)?;
    validate_ema_params(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> SignalbackError {
    SignalbackError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_start_date(config: &dyn ConfigPort) -> Result<(), SignalbackError> {
    let value = config.get_string("backtest", "start_date").ok_or_else(|| {
        SignalbackError::ConfigMissing {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
        }
    })?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|e| invalid("backtest", "start_date", format!("not a date: {}", e)))?;
    Ok(())
}

fn validate_stock_ratio(config: &dyn ConfigPort) -> Result<(), SignalbackError> {
    let value = config.get_double("backtest", "stock_ratio", DEFAULT_STOCK_RATIO);
    if !(0.0..=100.0).contains(&value) {
        return Err(invalid(
            "backtest",
            "stock_ratio",
            "stock_ratio must be between 0 and 100",
        ));
    }
    Ok(())
}

fn validate_mode(config: &dyn ConfigPort) -> Result<(), SignalbackError> {
    let mode = config
        .get_string("strategy", "mode")
        .unwrap_or_else(|| "hybrid".to_string());
    match mode.as_str() {
        "rsi" | "ema" | "hybrid" => Ok(()),
        other => Err(invalid(
            "strategy",
            "mode",
            format!("unknown mode '{}', expected rsi, ema or hybrid", other),
        )),
    }
}

fn validate_rsi_params(config: &dyn ConfigPort) -> Result<(), SignalbackError> {
    let buy = config.get_double("rsi", "buy_threshold", DEFAULT_RSI_BUY_THRESHOLD);
    let sell = config.get_double("rsi", "sell_threshold", DEFAULT_RSI_SELL_THRESHOLD);

    if !(0.0..=100.0).contains(&buy) {
        return Err(invalid(
            "rsi",
            "buy_threshold",
            "buy_threshold must be between 0 and 100",
        ));
    }
    if !(0.0..=100.0).contains(&sell) {
        return Err(invalid(
            "rsi",
            "sell_threshold",
            "sell_threshold must be between 0 and 100",
        ));
    }
    // Overlapping thresholds would make a single day both a buy and a
    // sell candidate; the engine stays permissive, so reject it here.
    if buy >= sell {
        return Err(invalid(
            "rsi",
            "buy_threshold",
            "buy_threshold must be below sell_threshold",
        ));
    }

    let buy_amount = config.get_double("rsi", "buy_amount", DEFAULT_RSI_BUY_AMOUNT);
    if buy_amount <= 0.0 {
        return Err(invalid("rsi", "buy_amount", "buy_amount must be positive"));
    }
    let sell_amount = config.get_double("rsi", "sell_amount", DEFAULT_RSI_SELL_AMOUNT);
    if sell_amount <= 0.0 {
        return Err(invalid(
            "rsi",
            "sell_amount",
            "sell_amount must be positive",
        ));
    }
    Ok(())
}

fn validate_ema_params(config: &dyn ConfigPort) -> Result<(), SignalbackError> {
    for (key, default) in [
        ("buy60_percent", DEFAULT_EMA_BUY60),
        ("buy120_percent", DEFAULT_EMA_BUY120),
        ("buy200_percent", DEFAULT_EMA_BUY200),
    ] {
        let value = config.get_double("ema", key, default);
        if value < 0.0 {
            return Err(invalid("ema", key, format!("{} must be non-negative", key)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn minimal_config_is_valid() {
        let cfg = config("[backtest]\nstart_date = 2015-01-01\n");
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn missing_start_date_is_rejected() {
        let cfg = config("[backtest]\nstock_ratio = 50\n");
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, SignalbackError::ConfigMissing { .. }));
    }

    #[test]
    fn malformed_start_date_is_rejected() {
        let cfg = config("[backtest]\nstart_date = 01/01/2015\n");
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, SignalbackError::ConfigInvalid { .. }));
    }

    #[test]
    fn stock_ratio_out_of_range_is_rejected() {
        let cfg = config("[backtest]\nstart_date = 2015-01-01\nstock_ratio = 120\n");
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let cfg = config(
            "[backtest]\nstart_date = 2015-01-01\n\n[strategy]\nmode = momentum\n",
        );
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn overlapping_rsi_thresholds_are_rejected() {
        let cfg = config(
            "[backtest]\nstart_date = 2015-01-01\n\n[rsi]\nbuy_threshold = 70\nsell_threshold = 30\n",
        );
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn negative_ema_tier_is_rejected() {
        let cfg = config(
            "[backtest]\nstart_date = 2015-01-01\n\n[ema]\nbuy120_percent = -5\n",
        );
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn zero_rsi_amount_is_rejected() {
        let cfg = config(
            "[backtest]\nstart_date = 2015-01-01\n\n[rsi]\nbuy_amount = 0\n",
        );
        assert!(validate_config(&cfg).is_err());
    }
}
