use thiserror::Error;

use crate::values::{Price, Quantity};

/// Domain-level errors for trade construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    #[error("Invalid trade: quantity and price must be positive (quantity={quantity}, price={price})")]
    InvalidTrade { quantity: Quantity, price: Price },
}

pub type TradeResult<T> = std::result::Result<T, TradeError>;
