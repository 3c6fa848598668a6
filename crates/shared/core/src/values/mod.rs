use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Traded quantity in whole shares
pub type Quantity = u64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Ticker symbol for a listed instrument (e.g. "TEA")
pub type Symbol = String;
