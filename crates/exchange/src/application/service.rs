use log::{debug, info};
use rust_decimal::Decimal;
use tokio::sync::mpsc::{Receiver, Sender, channel};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::application::{Exchange, Instrument};
use crate::error::{ExchangeError, Result};
use crate::model::{InstrumentSnapshot, Price, Quantity, Side, Symbol, Timestamp, Trade};

/// Requests processed by the [`ExchangeService`] actor
#[derive(Debug)]
pub enum ExchangeCommand {
    AddInstrument {
        instrument: Instrument,
        reply: oneshot::Sender<()>,
    },
    RecordTrade {
        symbol: Symbol,
        /// Execution time; `None` means the clock's current time
        timestamp: Option<Timestamp>,
        quantity: Quantity,
        side: Side,
        price: Price,
        reply: oneshot::Sender<Result<Trade>>,
    },
    DividendYield {
        symbol: Symbol,
        price: Price,
        reply: oneshot::Sender<Result<Option<Decimal>>>,
    },
    PeRatio {
        symbol: Symbol,
        price: Price,
        reply: oneshot::Sender<Result<Option<Decimal>>>,
    },
    VolumeWeightedPrice {
        symbol: Symbol,
        reply: oneshot::Sender<Result<Option<Price>>>,
    },
    AllShareIndex {
        reply: oneshot::Sender<Option<Decimal>>,
    },
    Snapshot {
        symbol: Symbol,
        reply: oneshot::Sender<Option<InstrumentSnapshot>>,
    },
    Symbols {
        reply: oneshot::Sender<Vec<Symbol>>,
    },
}

/// Single-writer owner of an [`Exchange`]
///
/// Commands are applied one at a time in arrival order, so concurrent
/// callers never observe a half-applied mutation. The loop ends when every
/// [`ExchangeHandle`] has been dropped, handing the exchange back.
pub struct ExchangeService {
    exchange: Exchange,
    rx: Receiver<ExchangeCommand>,
}

impl ExchangeService {
    /// Create the service and the first handle to it
    pub fn new(exchange: Exchange, channel_capacity: usize) -> (Self, ExchangeHandle) {
        let (tx, rx) = channel(channel_capacity);
        (Self { exchange, rx }, ExchangeHandle { tx })
    }

    /// Spawn the service on the current tokio runtime
    pub fn spawn(
        exchange: Exchange,
        channel_capacity: usize,
    ) -> (ExchangeHandle, JoinHandle<Exchange>) {
        let (service, handle) = Self::new(exchange, channel_capacity);
        let task = tokio::spawn(service.run());
        (handle, task)
    }

    /// Process commands until all handles are dropped
    pub async fn run(mut self) -> Exchange {
        info!(
            "Exchange service started with {} instruments",
            self.exchange.len()
        );

        while let Some(command) = self.rx.recv().await {
            self.handle(command);
        }

        info!("Exchange service stopped");
        self.exchange
    }

    fn handle(&mut self, command: ExchangeCommand) {
        // A dropped reply receiver means the caller gave up; nothing to do.
        match command {
            ExchangeCommand::AddInstrument { instrument, reply } => {
                self.exchange.add_instrument(instrument);
                let _ = reply.send(());
            }
            ExchangeCommand::RecordTrade {
                symbol,
                timestamp,
                quantity,
                side,
                price,
                reply,
            } => {
                let result = match timestamp {
                    Some(ts) => self
                        .exchange
                        .record_trade_at(&symbol, ts, quantity, side, price),
                    None => self.exchange.record_trade(&symbol, quantity, side, price),
                };
                if let Err(e) = &result {
                    debug!("Trade on {} rejected: {}", symbol, e);
                }
                let _ = reply.send(result);
            }
            ExchangeCommand::DividendYield {
                symbol,
                price,
                reply,
            } => {
                let result = self
                    .listed(&symbol)
                    .map(|i| i.calculate_dividend_yield(price));
                let _ = reply.send(result);
            }
            ExchangeCommand::PeRatio {
                symbol,
                price,
                reply,
            } => {
                let result = self.listed(&symbol).map(|i| i.calculate_pe_ratio(price));
                let _ = reply.send(result);
            }
            ExchangeCommand::VolumeWeightedPrice { symbol, reply } => {
                let result = self
                    .listed(&symbol)
                    .map(|i| i.calculate_volume_weighted_stock_price());
                let _ = reply.send(result);
            }
            ExchangeCommand::AllShareIndex { reply } => {
                let _ = reply.send(self.exchange.calculate_all_share_index());
            }
            ExchangeCommand::Snapshot { symbol, reply } => {
                let snapshot = self
                    .exchange
                    .get_instrument(&symbol)
                    .map(InstrumentSnapshot::from);
                let _ = reply.send(snapshot);
            }
            ExchangeCommand::Symbols { reply } => {
                let _ = reply.send(self.exchange.symbols());
            }
        }
    }

    fn listed(&self, symbol: &str) -> Result<&Instrument> {
        self.exchange
            .get_instrument(symbol)
            .ok_or_else(|| ExchangeError::SymbolNotFound(symbol.to_string()))
    }
}

/// Cloneable async front-end to a running [`ExchangeService`]
#[derive(Debug, Clone)]
pub struct ExchangeHandle {
    tx: Sender<ExchangeCommand>,
}

impl ExchangeHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> ExchangeCommand,
    ) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(build(reply))
            .await
            .map_err(|_| ExchangeError::ServiceUnavailable)?;
        response.await.map_err(|_| ExchangeError::ServiceUnavailable)
    }

    pub async fn add_instrument(&self, instrument: Instrument) -> Result<()> {
        self.request(|reply| ExchangeCommand::AddInstrument { instrument, reply })
            .await
    }

    /// Record a trade at the service clock's current time
    pub async fn record_trade(
        &self,
        symbol: &str,
        quantity: Quantity,
        side: Side,
        price: Price,
    ) -> Result<Trade> {
        self.request(|reply| ExchangeCommand::RecordTrade {
            symbol: symbol.to_string(),
            timestamp: None,
            quantity,
            side,
            price,
            reply,
        })
        .await?
    }

    /// Backfill a trade executed at `timestamp`
    pub async fn record_trade_at(
        &self,
        symbol: &str,
        timestamp: Timestamp,
        quantity: Quantity,
        side: Side,
        price: Price,
    ) -> Result<Trade> {
        self.request(|reply| ExchangeCommand::RecordTrade {
            symbol: symbol.to_string(),
            timestamp: Some(timestamp),
            quantity,
            side,
            price,
            reply,
        })
        .await?
    }

    pub async fn dividend_yield(&self, symbol: &str, price: Price) -> Result<Option<Decimal>> {
        self.request(|reply| ExchangeCommand::DividendYield {
            symbol: symbol.to_string(),
            price,
            reply,
        })
        .await?
    }

    pub async fn pe_ratio(&self, symbol: &str, price: Price) -> Result<Option<Decimal>> {
        self.request(|reply| ExchangeCommand::PeRatio {
            symbol: symbol.to_string(),
            price,
            reply,
        })
        .await?
    }

    pub async fn volume_weighted_price(&self, symbol: &str) -> Result<Option<Price>> {
        self.request(|reply| ExchangeCommand::VolumeWeightedPrice {
            symbol: symbol.to_string(),
            reply,
        })
        .await?
    }

    pub async fn all_share_index(&self) -> Result<Option<Decimal>> {
        self.request(|reply| ExchangeCommand::AllShareIndex { reply })
            .await
    }

    pub async fn instrument_snapshot(&self, symbol: &str) -> Result<Option<InstrumentSnapshot>> {
        self.request(|reply| ExchangeCommand::Snapshot {
            symbol: symbol.to_string(),
            reply,
        })
        .await
    }

    pub async fn symbols(&self) -> Result<Vec<Symbol>> {
        self.request(|reply| ExchangeCommand::Symbols { reply }).await
    }
}
