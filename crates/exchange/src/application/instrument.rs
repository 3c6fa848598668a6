use chrono::Duration;
use gbce_core::metrics;
use gbce_ports::Clock;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::model::{
    DividendPolicy, InstrumentKind, Price, Quantity, Side, Symbol, Timestamp, Trade, TradeError,
};

/// A listed stock with its append-only trade log
///
/// The dividend policy decides how the dividend is derived; everything else
/// (yield, P/E, VWSP) is shared between common and preferred stock. Current
/// time always comes from the injected [`Clock`].
pub struct Instrument {
    symbol: Symbol,
    par_value: Decimal,
    policy: DividendPolicy,
    trades: Vec<Trade>,
    vwsp_window: Duration,
    clock: Arc<dyn Clock>,
}

impl Instrument {
    pub fn new(
        symbol: impl Into<Symbol>,
        par_value: Decimal,
        policy: DividendPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            par_value,
            policy,
            trades: Vec::new(),
            vwsp_window: Duration::seconds(metrics::VWSP_WINDOW_SECS),
            clock,
        }
    }

    /// Common stock paying `last_dividend`
    pub fn common(
        symbol: impl Into<Symbol>,
        par_value: Decimal,
        last_dividend: Decimal,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(
            symbol,
            par_value,
            DividendPolicy::common(last_dividend),
            clock,
        )
    }

    /// Preferred stock paying `fixed_dividend_rate * par_value`
    pub fn preferred(
        symbol: impl Into<Symbol>,
        par_value: Decimal,
        last_dividend: Decimal,
        fixed_dividend_rate: Decimal,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(
            symbol,
            par_value,
            DividendPolicy::preferred(last_dividend, fixed_dividend_rate),
            clock,
        )
    }

    /// Override the trailing window used for the volume weighted price
    pub fn with_vwsp_window(mut self, window: Duration) -> Self {
        self.vwsp_window = window;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn par_value(&self) -> Decimal {
        self.par_value
    }

    pub fn policy(&self) -> &DividendPolicy {
        &self.policy
    }

    pub fn kind(&self) -> InstrumentKind {
        self.policy.kind()
    }

    /// Last declared dividend, kept for listings even on preferred stock
    pub fn last_dividend(&self) -> Decimal {
        self.policy.last_dividend()
    }

    /// Recorded trades in recording order
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn vwsp_window(&self) -> Duration {
        self.vwsp_window
    }

    /// Dividend used for yield and P/E
    pub fn get_dividend(&self) -> Decimal {
        self.policy.dividend(self.par_value)
    }

    pub fn calculate_dividend_yield(&self, price: Price) -> Option<Decimal> {
        metrics::dividend_yield(self.get_dividend(), price)
    }

    pub fn calculate_pe_ratio(&self, price: Price) -> Option<Decimal> {
        metrics::pe_ratio(self.get_dividend(), price)
    }

    /// Record an execution at the clock's current time
    pub fn record_trade(
        &mut self,
        quantity: Quantity,
        side: Side,
        price: Price,
    ) -> Result<&Trade, TradeError> {
        let now = self.clock.now();
        self.record_trade_at(now, quantity, side, price)
    }

    /// Record an execution that happened at `timestamp`
    ///
    /// Used to backfill executions reported late. The trade is appended in
    /// call order regardless of its timestamp.
    pub fn record_trade_at(
        &mut self,
        timestamp: Timestamp,
        quantity: Quantity,
        side: Side,
        price: Price,
    ) -> Result<&Trade, TradeError> {
        let trade = Trade::new(timestamp, quantity, side, price)?;
        debug!("{}: recorded {}", self.symbol, trade);

        self.trades.push(trade);
        Ok(&self.trades[self.trades.len() - 1])
    }

    /// VWSP over the trades inside the trailing window ending now
    pub fn calculate_volume_weighted_stock_price(&self) -> Option<Price> {
        let cutoff = self.clock.window_start(self.vwsp_window);
        let vwsp = metrics::volume_weighted_price(&self.trades, cutoff);
        debug!("{}: VWSP since {} = {:?}", self.symbol, cutoff, vwsp);
        vwsp
    }
}

impl std::fmt::Debug for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instrument")
            .field("symbol", &self.symbol)
            .field("par_value", &self.par_value)
            .field("policy", &self.policy)
            .field("trades", &self.trades.len())
            .field("vwsp_window", &self.vwsp_window)
            .field("clock", &self.clock.name())
            .finish()
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.symbol, self.kind())
    }
}
