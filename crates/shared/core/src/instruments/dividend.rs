use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of stock, as shown in listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    Common,
    Preferred,
}

impl std::fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstrumentKind::Common => write!(f, "Common"),
            InstrumentKind::Preferred => write!(f, "Preferred"),
        }
    }
}

/// How an instrument's dividend is derived
///
/// Preferred stock keeps its `last_dividend` for listings, but the dividend
/// used in yield and P/E is always `fixed_dividend_rate * par_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DividendPolicy {
    Common {
        last_dividend: Decimal,
    },
    Preferred {
        last_dividend: Decimal,
        /// Expected in [0, 1], e.g. 0.02 = 2%
        fixed_dividend_rate: Decimal,
    },
}

impl DividendPolicy {
    pub fn common(last_dividend: Decimal) -> Self {
        DividendPolicy::Common { last_dividend }
    }

    pub fn preferred(last_dividend: Decimal, fixed_dividend_rate: Decimal) -> Self {
        DividendPolicy::Preferred {
            last_dividend,
            fixed_dividend_rate,
        }
    }

    /// Dividend per share for an instrument with the given par value
    ///
    /// A preferred dividend beyond the `Decimal` range saturates at
    /// `Decimal::MAX` (or `MIN`).
    pub fn dividend(&self, par_value: Decimal) -> Decimal {
        match self {
            DividendPolicy::Common { last_dividend } => *last_dividend,
            DividendPolicy::Preferred {
                fixed_dividend_rate,
                ..
            } => fixed_dividend_rate.saturating_mul(par_value),
        }
    }

    pub fn last_dividend(&self) -> Decimal {
        match self {
            DividendPolicy::Common { last_dividend } => *last_dividend,
            DividendPolicy::Preferred { last_dividend, .. } => *last_dividend,
        }
    }

    pub fn fixed_dividend_rate(&self) -> Option<Decimal> {
        match self {
            DividendPolicy::Common { .. } => None,
            DividendPolicy::Preferred {
                fixed_dividend_rate,
                ..
            } => Some(*fixed_dividend_rate),
        }
    }

    pub fn kind(&self) -> InstrumentKind {
        match self {
            DividendPolicy::Common { .. } => InstrumentKind::Common,
            DividendPolicy::Preferred { .. } => InstrumentKind::Preferred,
        }
    }
}
