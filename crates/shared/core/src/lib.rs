//! GBCE Core Domain
//!
//! Pure domain types for the GBCE stock market.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod error;
pub mod instruments;
pub mod metrics;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Side, Trade, TradeId};
pub use error::{TradeError, TradeResult};
pub use instruments::{DividendPolicy, InstrumentKind};
pub use metrics::VWSP_WINDOW_SECS;
pub use values::{Price, Quantity, Symbol, Timestamp};
