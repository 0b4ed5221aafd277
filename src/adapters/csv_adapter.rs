//! CSV file data adapter.
//!
//! Reads raw `date,open,high,low,close` files. Indicator columns are
//! not expected in CSV input; callers run the enrichment pass after
//! loading. Output is sorted and de-duplicated by date to satisfy the
//! engine's input contract.

use crate::domain::error::SignalbackError;
use crate::domain::price::PriceBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, SignalbackError> {
    record.get(index).ok_or_else(|| SignalbackError::Data {
        reason: format!("missing {} column", name),
    })
}

fn parse_price(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, SignalbackError> {
    field(record, index, name)?
        .parse()
        .map_err(|e| SignalbackError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvAdapter {
    fn load_prices(&self) -> Result<Vec<PriceBar>, SignalbackError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SignalbackError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| SignalbackError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = field(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                SignalbackError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            let open = parse_price(&record, 1, "open")?;
            let high = parse_price(&record, 2, "high")?;
            let low = parse_price(&record, 3, "low")?;
            let close = parse_price(&record, 4, "close")?;

            bars.push(PriceBar::raw(date, open, high, low, close));
        }

        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Ok(bars)
    }
}
