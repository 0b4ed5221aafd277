//! Price data access port trait.

use crate::domain::error::SignalbackError;
use crate::domain::price::PriceBar;

/// Loads a daily price series from some backing store.
///
/// Implementations must return bars sorted ascending by date with no
/// duplicate dates; the engine treats that as an input contract.
pub trait DataPort {
    fn load_prices(&self) -> Result<Vec<PriceBar>, SignalbackError>;
}
