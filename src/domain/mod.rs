//! Core domain types and logic.

pub mod price;
pub mod indicator;
pub mod enrich;
pub mod strategy;
pub mod backtest;
pub mod config_validation;
pub mod error;
