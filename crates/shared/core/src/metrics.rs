//! Stock metrics
//!
//! Pure calculations over snapshots of instrument data. Every function here
//! answers `None` when the metric has no meaningful value (non-positive price,
//! zero dividend, empty trade window) rather than failing.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::entities::Trade;
use crate::values::{Price, Timestamp};

/// Default trailing window for the volume weighted stock price (5 minutes)
pub const VWSP_WINDOW_SECS: i64 = 5 * 60;

/// Dividend yield: `dividend / price`
///
/// `None` for a non-positive price, and also when the quotient falls outside
/// the `Decimal` range (a huge dividend over a tiny price).
pub fn dividend_yield(dividend: Decimal, price: Price) -> Option<Decimal> {
    if price <= Decimal::ZERO {
        return None;
    }
    dividend.checked_div(price)
}

/// P/E ratio: `price / dividend`, undefined for a zero dividend
///
/// Like [`dividend_yield`], a quotient outside the `Decimal` range is `None`.
pub fn pe_ratio(dividend: Decimal, price: Price) -> Option<Decimal> {
    if price <= Decimal::ZERO || dividend.is_zero() {
        return None;
    }
    price.checked_div(dividend)
}

/// Volume weighted price of every trade at or after `cutoff`
///
/// `Σ(price × quantity) / Σ(quantity)` over the trades in the window. The sums
/// are exact in `Decimal`; if they leave its range the price is computed in
/// f64 instead.
pub fn volume_weighted_price<'a, I>(trades: I, cutoff: Timestamp) -> Option<Price>
where
    I: IntoIterator<Item = &'a Trade>,
{
    let window: Vec<&Trade> = trades
        .into_iter()
        .filter(|t| t.timestamp() >= cutoff)
        .collect();

    if window.is_empty() {
        return None;
    }
    exact_weighted_price(&window).or_else(|| approximate_weighted_price(&window))
}

fn exact_weighted_price(trades: &[&Trade]) -> Option<Price> {
    let mut total_value = Decimal::ZERO;
    let mut total_quantity = Decimal::ZERO;

    for trade in trades {
        total_value = total_value.checked_add(trade.notional()?)?;
        total_quantity = total_quantity.checked_add(Decimal::from(trade.quantity()))?;
    }
    total_value.checked_div(total_quantity)
}

fn approximate_weighted_price(trades: &[&Trade]) -> Option<Price> {
    let mut total_value = 0.0_f64;
    let mut total_quantity = 0.0_f64;

    for trade in trades {
        let quantity = trade.quantity() as f64;
        total_value += trade.price().to_f64()? * quantity;
        total_quantity += quantity;
    }
    Decimal::from_f64(total_value / total_quantity)
}

/// Geometric mean `(Π values)^(1/n)`, computed as `exp(mean(ln(values)))`
///
/// Returns `None` for an empty input or if any value is not strictly positive.
pub fn geometric_mean<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let mut log_sum = 0.0_f64;
    let mut count = 0_u32;

    for value in values {
        if value <= Decimal::ZERO {
            return None;
        }
        log_sum += value.to_f64()?.ln();
        count += 1;
    }

    if count == 0 {
        return None;
    }
    Decimal::from_f64((log_sum / f64::from(count)).exp())
}
