//! JSON cache data adapter.
//!
//! Reads the enriched price cache produced by the upstream fetch step:
//! a document with a `lastUpdated` stamp and a `prices` array whose
//! records key the date as `time` and may carry precomputed indicator
//! columns. Warmup RSI slots are stored as literal 0 in that format and
//! are normalized to absent here, so strategies hold instead of
//! treating 0 as a deeply oversold reading.

use crate::domain::error::SignalbackError;
use crate::domain::price::PriceBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct PriceCache {
    #[serde(rename = "lastUpdated")]
    #[allow(dead_code)]
    last_updated: Option<String>,
    prices: Vec<CachedPrice>,
}

#[derive(Debug, Deserialize)]
struct CachedPrice {
    time: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    ema20: Option<f64>,
    ema60: Option<f64>,
    ema120: Option<f64>,
    ema200: Option<f64>,
    rsi: Option<f64>,
}

impl From<CachedPrice> for PriceBar {
    fn from(raw: CachedPrice) -> Self {
        PriceBar {
            date: raw.time,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            ema20: raw.ema20,
            ema60: raw.ema60,
            ema120: raw.ema120,
            ema200: raw.ema200,
            rsi: raw.rsi.filter(|v| *v != 0.0),
        }
    }
}

pub struct JsonAdapter {
    path: PathBuf,
}

impl JsonAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DataPort for JsonAdapter {
    fn load_prices(&self) -> Result<Vec<PriceBar>, SignalbackError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SignalbackError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let cache: PriceCache =
            serde_json::from_str(&content).map_err(|e| SignalbackError::Data {
                reason: format!("JSON parse error: {}", e),
            })?;

        let mut bars: Vec<PriceBar> = cache.prices.into_iter().map(PriceBar::from).collect();
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Ok(bars)
    }
}
