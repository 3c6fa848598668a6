//! Market configuration
//!
//! Listings are loaded from JSON:
//!
//! ```json
//! {
//!   "name": "GBCE",
//!   "vwsp_window_secs": 300,
//!   "instruments": [
//!     { "symbol": "POP", "type": "common", "par_value": "100", "last_dividend": "8" },
//!     { "symbol": "GIN", "type": "preferred", "par_value": "100",
//!       "last_dividend": "8", "fixed_dividend_rate": "0.02" }
//!   ]
//! }
//! ```

use chrono::Duration;
use gbce_core::VWSP_WINDOW_SECS;
use gbce_ports::Clock;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::application::Instrument;
use crate::error::{ExchangeError, Result};
use crate::model::{DividendPolicy, Symbol};

/// Longest accepted VWSP window (one day)
pub const MAX_VWSP_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Root configuration for a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Exchange name/identifier
    #[serde(default = "default_market_name")]
    pub name: String,

    /// Trailing window for the volume weighted stock price, in seconds
    #[serde(default = "default_vwsp_window_secs")]
    pub vwsp_window_secs: i64,

    /// Instruments to list
    #[serde(default)]
    pub instruments: Vec<InstrumentConfig>,
}

/// One listed instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub symbol: Symbol,
    pub par_value: Decimal,
    #[serde(flatten)]
    pub dividend: DividendPolicy,
}

fn default_market_name() -> String {
    "Global Beverage Corporation Exchange".to_string()
}

fn default_vwsp_window_secs() -> i64 {
    VWSP_WINDOW_SECS
}

impl MarketConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check listings for empty or duplicate symbols and non-positive values
    pub fn validate(&self) -> Result<()> {
        if self.vwsp_window_secs <= 0 || self.vwsp_window_secs > MAX_VWSP_WINDOW_SECS {
            return Err(ExchangeError::Config(format!(
                "vwsp_window_secs must be in 1..={}, got {}",
                MAX_VWSP_WINDOW_SECS, self.vwsp_window_secs
            )));
        }

        let mut seen = HashSet::new();
        for instrument in &self.instruments {
            if instrument.symbol.trim().is_empty() {
                return Err(ExchangeError::Config("empty instrument symbol".to_string()));
            }
            if instrument.par_value <= Decimal::ZERO {
                return Err(ExchangeError::Config(format!(
                    "{}: par value must be positive, got {}",
                    instrument.symbol, instrument.par_value
                )));
            }
            if instrument.dividend.last_dividend() < Decimal::ZERO {
                return Err(ExchangeError::Config(format!(
                    "{}: last dividend must not be negative",
                    instrument.symbol
                )));
            }
            if !seen.insert(instrument.symbol.as_str()) {
                return Err(ExchangeError::Config(format!(
                    "duplicate symbol {}",
                    instrument.symbol
                )));
            }
        }
        Ok(())
    }

    /// Configured window; an unvalidated value out of range maps to `Duration::MAX`
    pub fn vwsp_window(&self) -> Duration {
        Duration::try_seconds(self.vwsp_window_secs).unwrap_or(Duration::MAX)
    }

    /// Build the configured instruments, all reading time from `clock`
    pub fn build_instruments(&self, clock: Arc<dyn Clock>) -> Vec<Instrument> {
        self.instruments
            .iter()
            .map(|cfg| {
                Instrument::new(
                    cfg.symbol.clone(),
                    cfg.par_value,
                    cfg.dividend.clone(),
                    clock.clone(),
                )
                .with_vwsp_window(self.vwsp_window())
            })
            .collect()
    }
}

impl InstrumentConfig {
    pub fn common(symbol: &str, par_value: Decimal, last_dividend: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            par_value,
            dividend: DividendPolicy::common(last_dividend),
        }
    }

    pub fn preferred(
        symbol: &str,
        par_value: Decimal,
        last_dividend: Decimal,
        fixed_dividend_rate: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            par_value,
            dividend: DividendPolicy::preferred(last_dividend, fixed_dividend_rate),
        }
    }
}

/// The GBCE sample listings
impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            name: default_market_name(),
            vwsp_window_secs: default_vwsp_window_secs(),
            instruments: vec![
                InstrumentConfig::common("TEA", dec!(100), dec!(0)),
                InstrumentConfig::common("POP", dec!(100), dec!(8)),
                InstrumentConfig::common("ALE", dec!(60), dec!(23)),
                InstrumentConfig::preferred("GIN", dec!(100), dec!(8), dec!(0.02)),
                InstrumentConfig::common("JOE", dec!(250), dec!(13)),
            ],
        }
    }
}
