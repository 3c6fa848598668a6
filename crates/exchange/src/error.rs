use gbce_core::TradeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error(transparent)]
    InvalidTrade(#[from] TradeError),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Invalid market configuration: {0}")]
    Config(String),

    #[error("Exchange service is not running")]
    ServiceUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
