//! Bootstrap - market setup
//!
//! Loads the listings (from a JSON file or the built-in GBCE table) and
//! starts the exchange service that owns them.

use gbce_clock::Clock;
use gbce_exchange::{Exchange, ExchangeHandle, ExchangeService, MarketConfig, Result};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Bootstrap configuration
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Listings file; the GBCE sample table is used when absent
    pub config_path: Option<PathBuf>,
    /// Command channel capacity of the exchange service
    pub channel_capacity: usize,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            channel_capacity: 1024,
        }
    }
}

impl BootstrapConfig {
    /// Build from command line arguments: `gbce [config.json]`
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        Self {
            config_path: args.nth(1).map(PathBuf::from),
            ..Self::default()
        }
    }

    pub fn load_market(&self) -> Result<MarketConfig> {
        match &self.config_path {
            Some(path) => {
                info!("Loading listings from {}", path.display());
                MarketConfig::from_file(path)
            }
            None => Ok(MarketConfig::default()),
        }
    }
}

/// A running market: the service handle plus its task
pub struct MarketBootstrap {
    pub market: MarketConfig,
    pub handle: ExchangeHandle,
    pub task: JoinHandle<Exchange>,
}

impl MarketBootstrap {
    /// Load listings and spawn the exchange service on the current runtime
    pub fn start(config: &BootstrapConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let market = config.load_market()?;
        let exchange = Exchange::from_config(&market, clock)?;
        let (handle, task) = ExchangeService::spawn(exchange, config.channel_capacity);

        Ok(Self {
            market,
            handle,
            task,
        })
    }
}
