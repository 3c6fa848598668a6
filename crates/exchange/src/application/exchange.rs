use gbce_core::metrics;
use gbce_ports::Clock;
use log::{debug, info, trace, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::Instrument;
use crate::error::{ExchangeError, Result};
use crate::infrastructure::MarketConfig;
use crate::model::{Price, Quantity, Side, Symbol, Timestamp, Trade};

/// Registry of listed instruments keyed by symbol
///
/// The exchange itself does no locking; wrap it in an
/// [`ExchangeService`](crate::ExchangeService) to share it between tasks.
#[derive(Debug, Default)]
pub struct Exchange {
    instruments: HashMap<Symbol, Instrument>,
}

impl Exchange {
    /// Create an empty exchange
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exchange listing every instrument in `config`
    pub fn from_config(config: &MarketConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;

        let mut exchange = Self::new();
        for instrument in config.build_instruments(clock) {
            exchange.add_instrument(instrument);
        }
        info!(
            "{}: listed {} instruments",
            config.name,
            exchange.instruments.len()
        );
        Ok(exchange)
    }

    /// List an instrument, replacing any previous listing under the same symbol
    pub fn add_instrument(&mut self, instrument: Instrument) {
        let symbol = instrument.symbol().to_string();
        info!("Listing {}", instrument);

        if let Some(previous) = self.instruments.insert(symbol, instrument) {
            warn!(
                "Replaced existing listing {} ({} trades dropped)",
                previous,
                previous.trade_count()
            );
        }
    }

    pub fn get_instrument(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.get(symbol)
    }

    pub fn get_instrument_mut(&mut self, symbol: &str) -> Option<&mut Instrument> {
        self.instruments.get_mut(symbol)
    }

    /// Record a trade against the instrument listed under `symbol`
    pub fn record_trade(
        &mut self,
        symbol: &str,
        quantity: Quantity,
        side: Side,
        price: Price,
    ) -> Result<Trade> {
        let instrument = self.listed_mut(symbol)?;
        Ok(instrument.record_trade(quantity, side, price)?.clone())
    }

    /// Backfill a trade executed at `timestamp`
    pub fn record_trade_at(
        &mut self,
        symbol: &str,
        timestamp: Timestamp,
        quantity: Quantity,
        side: Side,
        price: Price,
    ) -> Result<Trade> {
        let instrument = self.listed_mut(symbol)?;
        Ok(instrument
            .record_trade_at(timestamp, quantity, side, price)?
            .clone())
    }

    fn listed_mut(&mut self, symbol: &str) -> Result<&mut Instrument> {
        self.instruments
            .get_mut(symbol)
            .ok_or_else(|| ExchangeError::SymbolNotFound(symbol.to_string()))
    }

    /// All Share Index: geometric mean of every positive VWSP on the exchange
    ///
    /// Instruments without recent trades are left out. Returns `None` when no
    /// instrument contributes.
    pub fn calculate_all_share_index(&self) -> Option<Decimal> {
        let prices: Vec<Price> = self
            .instruments
            .values()
            .filter_map(
                |instrument| match instrument.calculate_volume_weighted_stock_price() {
                    Some(vwsp) if vwsp > Decimal::ZERO => Some(vwsp),
                    _ => {
                        trace!("{}: no positive VWSP, left out of index", instrument.symbol());
                        None
                    }
                },
            )
            .collect();

        let index = metrics::geometric_mean(prices.iter().copied());
        debug!(
            "All Share Index over {} instruments = {:?}",
            prices.len(),
            index
        );
        index
    }

    /// Listed symbols in alphabetical order
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.instruments.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.values()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}
