pub mod config;

pub use config::{InstrumentConfig, MAX_VWSP_WINDOW_SECS, MarketConfig};
