//! Instrument definitions for listed stocks
//!
//! Common and preferred stock differ only in how the dividend is derived,
//! which is captured by the closed [`DividendPolicy`] enum.

mod dividend;

pub use dividend::{DividendPolicy, InstrumentKind};
