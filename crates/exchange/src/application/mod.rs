mod exchange;
mod instrument;
mod service;

pub use exchange::Exchange;
pub use instrument::Instrument;
pub use service::{ExchangeCommand, ExchangeHandle, ExchangeService};
