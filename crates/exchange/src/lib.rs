//! GBCE Exchange
//!
//! Listed instruments, their trade logs, and the market-wide All Share Index.
//!
//! - [`Instrument`]: a common or preferred stock with yield, P/E and VWSP
//! - [`Exchange`]: the symbol registry and the All Share Index
//! - [`ExchangeService`]: single-writer actor owning an exchange, driven
//!   through cloneable [`ExchangeHandle`]s
//! - [`MarketConfig`]: JSON listings

// Application layer
pub mod application;

// Infrastructure layer
pub mod infrastructure;

// Cross-cutting concerns
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use application::{Exchange, ExchangeCommand, ExchangeHandle, ExchangeService, Instrument};
pub use error::{ExchangeError, Result};
pub use infrastructure::{InstrumentConfig, MarketConfig};
pub use model::InstrumentSnapshot;
