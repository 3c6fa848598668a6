use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::Side;
use crate::error::{TradeError, TradeResult};
use crate::values::{Price, Quantity, Timestamp};

/// Unique identifier for a trade
pub type TradeId = Uuid;

/// A single execution recorded against an instrument
///
/// Quantity and price are validated once at construction and the record is
/// immutable afterwards, so every `Trade` in circulation satisfies
/// `quantity > 0` and `price > 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    id: TradeId,
    timestamp: Timestamp,
    quantity: Quantity,
    side: Side,
    price: Price,
}

impl Trade {
    /// Create a new trade executed at `timestamp`
    pub fn new(
        timestamp: Timestamp,
        quantity: Quantity,
        side: Side,
        price: Price,
    ) -> TradeResult<Self> {
        if quantity == 0 || price <= Decimal::ZERO {
            return Err(TradeError::InvalidTrade { quantity, price });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            timestamp,
            quantity,
            side,
            price,
        })
    }

    pub fn id(&self) -> TradeId {
        self.id
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Notional value (price * quantity), `None` if it exceeds the `Decimal` range
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trade(time={}, qty={}, side={}, price={})",
            self.timestamp, self.quantity, self.side, self.price
        )
    }
}
