//! Market-data provider adapters.

mod alphavantage;

pub use alphavantage::{parse_daily_series, AlphaVantageAdapter, DEFAULT_BASE_URL};
