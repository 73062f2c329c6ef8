//! Domain types for tickguess.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, uppercased ticker |
//! | [`TradingDate`] | Calendar day of a daily record |
//! | [`PricePoint`] | One day's closing price and its [`PriceBasis`] |
//! | [`Series`] | Chronological, duplicate-free price history |

mod date;
mod series;
mod symbol;

pub use date::TradingDate;
pub use series::{PriceBasis, PricePoint, Series};
pub use symbol::Symbol;
