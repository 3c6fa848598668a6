//! Demo - the sample trading session
//!
//! Quotes yield and P/E for POP and GIN at 110p, builds up ALE's trade log
//! (one trade aged out of the VWSP window, two inside it), trades every other
//! stock once and finally computes the All Share Index.

use chrono::Duration;
use gbce_clock::Clock;
use gbce_core::{Price, Side, Symbol};
use gbce_exchange::{ExchangeHandle, Result};
use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Yield and P/E of one stock at the quote price
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLine {
    pub symbol: Symbol,
    pub dividend_yield: Option<Decimal>,
    pub pe_ratio: Option<Decimal>,
}

/// Everything the demo prints
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    pub market_name: String,
    pub symbols: Vec<Symbol>,
    pub quote_price: Price,
    pub quotes: Vec<QuoteLine>,
    pub vwsp: Vec<(Symbol, Option<Price>)>,
    pub all_share_index: Option<Decimal>,
}

const QUOTED: [&str; 2] = ["POP", "GIN"];

/// One trade per stock feeding the index: (symbol, quantity, side, price)
const INDEX_TRADES: [(&str, u64, Side, Decimal); 4] = [
    ("TEA", 1000, Side::Buy, dec!(98)),
    ("POP", 500, Side::Sell, dec!(122)),
    ("GIN", 200, Side::Buy, dec!(105)),
    ("JOE", 300, Side::Sell, dec!(240)),
];

/// Run the sample session against a running exchange service
pub async fn run_demo(
    handle: &ExchangeHandle,
    clock: &dyn Clock,
    market_name: &str,
) -> Result<DemoReport> {
    let quote_price = dec!(110);
    let symbols = handle.symbols().await?;
    info!("{}: {} stocks listed", market_name, symbols.len());

    let mut quotes = Vec::new();
    for symbol in QUOTED {
        quotes.push(QuoteLine {
            symbol: symbol.to_string(),
            dividend_yield: handle.dividend_yield(symbol, quote_price).await?,
            pe_ratio: handle.pe_ratio(symbol, quote_price).await?,
        });
    }

    // Aged trade, reported six minutes late; must not count towards VWSP.
    let six_minutes_ago = clock.now() - Duration::minutes(6);
    handle
        .record_trade_at("ALE", six_minutes_ago, 50, Side::Buy, dec!(65))
        .await?;
    handle.record_trade("ALE", 100, Side::Buy, dec!(70)).await?;
    handle.record_trade("ALE", 50, Side::Sell, dec!(72)).await?;
    let vwsp = vec![(
        "ALE".to_string(),
        handle.volume_weighted_price("ALE").await?,
    )];

    for (symbol, quantity, side, price) in INDEX_TRADES {
        handle.record_trade(symbol, quantity, side, price).await?;
    }
    let all_share_index = handle.all_share_index().await?;

    Ok(DemoReport {
        market_name: market_name.to_string(),
        symbols,
        quote_price,
        quotes,
        vwsp,
        all_share_index,
    })
}
