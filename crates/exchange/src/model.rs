// Re-export domain types from gbce-core
pub use gbce_core::{
    DividendPolicy, InstrumentKind, Price, Quantity, Side, Symbol, Timestamp, Trade, TradeError,
    TradeId,
};

use chrono::Duration;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::Instrument;

/// Point-in-time view of an instrument, safe to hand across threads
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentSnapshot {
    pub symbol: Symbol,
    pub kind: InstrumentKind,
    pub par_value: Decimal,
    pub last_dividend: Decimal,
    pub fixed_dividend_rate: Option<Decimal>,
    pub dividend: Decimal,
    pub trade_count: usize,
    pub volume_weighted_price: Option<Price>,
    #[serde(skip)]
    pub vwsp_window: Duration,
}

impl From<&Instrument> for InstrumentSnapshot {
    fn from(instrument: &Instrument) -> Self {
        Self {
            symbol: instrument.symbol().to_string(),
            kind: instrument.kind(),
            par_value: instrument.par_value(),
            last_dividend: instrument.last_dividend(),
            fixed_dividend_rate: instrument.policy().fixed_dividend_rate(),
            dividend: instrument.get_dividend(),
            trade_count: instrument.trade_count(),
            volume_weighted_price: instrument.calculate_volume_weighted_stock_price(),
            vwsp_window: instrument.vwsp_window(),
        }
    }
}
