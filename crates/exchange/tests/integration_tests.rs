//! Integration tests: listings, trade recording, and the All Share Index
//!
//! Time is driven by a `ManualClock` so every window calculation is
//! deterministic.

use chrono::{Duration, TimeZone, Utc};
use gbce_clock::{Clock, ManualClock};
use gbce_exchange::{
    Exchange, ExchangeError, ExchangeService, Instrument, InstrumentConfig, MarketConfig,
    model::{InstrumentKind, Side},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn market_open() -> Arc<ManualClock> {
    let _ = env_logger::try_init();
    ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
}

fn assert_close(actual: Decimal, expected: Decimal) {
    let diff = (actual - expected).abs();
    assert!(diff < dec!(0.0001), "{} != {}", actual, expected);
}

fn gbce(clock: &Arc<ManualClock>) -> Exchange {
    Exchange::from_config(&MarketConfig::default(), clock.clone()).expect("default listings")
}

#[test]
fn test_yield_and_pe_for_sample_listings() {
    let clock = market_open();
    let exchange = gbce(&clock);
    let price = dec!(110);

    let pop = exchange.get_instrument("POP").unwrap();
    assert_eq!(pop.calculate_dividend_yield(price), Some(dec!(8) / dec!(110)));
    assert_eq!(pop.calculate_pe_ratio(price), Some(dec!(13.75)));

    let gin = exchange.get_instrument("GIN").unwrap();
    assert_eq!(gin.kind(), InstrumentKind::Preferred);
    assert_eq!(gin.get_dividend(), dec!(2));
    assert_eq!(gin.calculate_dividend_yield(price), Some(dec!(2) / dec!(110)));
    assert_eq!(gin.calculate_pe_ratio(price), Some(dec!(55)));

    let tea = exchange.get_instrument("TEA").unwrap();
    assert_eq!(tea.calculate_pe_ratio(price), None);
    assert_eq!(tea.calculate_pe_ratio(dec!(0.01)), None);
}

#[test]
fn test_vwsp_excludes_aged_trade() {
    let clock = market_open();
    let mut exchange = gbce(&clock);

    // Trade six minutes ago, then two within the window.
    clock.advance(Duration::minutes(-6));
    exchange.record_trade("ALE", 50, Side::Buy, dec!(65)).unwrap();
    clock.advance(Duration::minutes(5));
    exchange.record_trade("ALE", 100, Side::Buy, dec!(70)).unwrap();
    clock.advance(Duration::minutes(1));
    exchange.record_trade("ALE", 50, Side::Sell, dec!(72)).unwrap();

    let ale = exchange.get_instrument("ALE").unwrap();
    assert_eq!(ale.trade_count(), 3);
    assert_eq!(
        ale.calculate_volume_weighted_stock_price(),
        Some(dec!(10600) / dec!(150))
    );
    assert_close(
        ale.calculate_volume_weighted_stock_price().unwrap(),
        dec!(70.6667),
    );
}

#[test]
fn test_vwsp_window_boundary() {
    let clock = market_open();
    let mut exchange = gbce(&clock);
    let t0 = clock.now();

    exchange
        .record_trade_at("JOE", t0 - Duration::minutes(5), 10, Side::Buy, dec!(250))
        .unwrap();
    let just_outside = t0 - Duration::minutes(5) - Duration::milliseconds(1);
    exchange
        .record_trade_at("JOE", just_outside, 1000, Side::Buy, dec!(1))
        .unwrap();

    let joe = exchange.get_instrument("JOE").unwrap();
    assert_eq!(joe.calculate_volume_weighted_stock_price(), Some(dec!(250)));
}

#[test]
fn test_all_share_index() {
    let clock = market_open();
    let mut exchange = gbce(&clock);

    exchange.record_trade("TEA", 1000, Side::Buy, dec!(98)).unwrap();
    exchange.record_trade("POP", 500, Side::Sell, dec!(122)).unwrap();
    exchange.record_trade("GIN", 200, Side::Buy, dec!(105)).unwrap();
    exchange.record_trade("JOE", 300, Side::Sell, dec!(240)).unwrap();

    // ALE has no trades and is left out.
    let index = exchange.calculate_all_share_index().unwrap();
    assert_close(index, dec!(131.748782873347));

    clock.advance(Duration::minutes(6));
    assert_eq!(exchange.calculate_all_share_index(), None);
}

#[test]
fn test_all_share_index_independent_of_listing_order() {
    let clock = market_open();
    let prices = [
        ("TEA", dec!(98)),
        ("POP", dec!(122)),
        ("GIN", dec!(105)),
        ("JOE", dec!(240)),
    ];

    let build = |order: &[usize]| {
        let mut exchange = Exchange::new();
        for &i in order {
            let (symbol, price) = prices[i];
            exchange.add_instrument(Instrument::common(symbol, dec!(100), dec!(1), clock.clone()));
            exchange.record_trade(symbol, 10, Side::Buy, price).unwrap();
        }
        exchange.calculate_all_share_index().unwrap()
    };

    assert_close(build(&[0, 1, 2, 3]), build(&[3, 1, 0, 2]));
}

#[test]
fn test_empty_exchange_has_no_index() {
    let _clock = market_open();
    assert_eq!(Exchange::new().calculate_all_share_index(), None);
}

#[test]
fn test_replaced_listing_returns_new_instrument() {
    let clock = market_open();
    let mut exchange = gbce(&clock);
    exchange.record_trade("POP", 10, Side::Buy, dec!(100)).unwrap();

    exchange.add_instrument(Instrument::common("POP", dec!(50), dec!(4), clock.clone()));

    let pop = exchange.get_instrument("POP").unwrap();
    assert_eq!(pop.par_value(), dec!(50));
    assert_eq!(pop.get_dividend(), dec!(4));
    assert_eq!(pop.trade_count(), 0);
    assert_eq!(exchange.len(), 5);
}

#[test]
fn test_failed_trade_aborts_without_recording() {
    let clock = market_open();
    let mut exchange = gbce(&clock);

    let err = exchange
        .record_trade("POP", 10, Side::Buy, dec!(-3))
        .unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidTrade(_)));
    assert!(err.to_string().contains("must be positive"));
    assert_eq!(exchange.get_instrument("POP").unwrap().trade_count(), 0);

    let err = exchange
        .record_trade("XYZ", 10, Side::Buy, dec!(3))
        .unwrap_err();
    assert!(matches!(err, ExchangeError::SymbolNotFound(_)));
}

#[test]
fn test_huge_trade_keeps_metrics_available() {
    let clock = market_open();
    let mut exchange = gbce(&clock);
    exchange.add_instrument(Instrument::common("BIG", dec!(100), dec!(1), clock.clone()));

    exchange
        .record_trade("BIG", u64::MAX, Side::Buy, dec!(10000000000))
        .unwrap();

    let big = exchange.get_instrument("BIG").unwrap();
    assert_close(
        big.calculate_volume_weighted_stock_price().unwrap() / dec!(10000000000),
        dec!(1),
    );
    assert!(exchange.calculate_all_share_index().is_some());
}

#[test]
fn test_config_window_applies_to_all_listings() {
    let clock = market_open();
    let config = MarketConfig {
        name: "Slow".to_string(),
        vwsp_window_secs: 900,
        instruments: vec![InstrumentConfig::common("TEA", dec!(100), dec!(0))],
    };
    let mut exchange = Exchange::from_config(&config, clock.clone()).unwrap();

    exchange.record_trade("TEA", 10, Side::Buy, dec!(98)).unwrap();
    clock.advance(Duration::minutes(10));
    assert_close(exchange.calculate_all_share_index().unwrap(), dec!(98));
}

#[test]
fn test_from_config_rejects_invalid_listing() {
    let clock = market_open();
    let config = MarketConfig {
        instruments: vec![
            InstrumentConfig::common("TEA", dec!(100), dec!(0)),
            InstrumentConfig::common("TEA", dec!(100), dec!(1)),
        ],
        ..MarketConfig::default()
    };
    assert!(matches!(
        Exchange::from_config(&config, clock),
        Err(ExchangeError::Config(_))
    ));
}

#[tokio::test]
async fn test_service_serializes_concurrent_writers() {
    let clock = market_open();
    let (handle, task) = ExchangeService::spawn(gbce(&clock), 8);

    let mut writers = Vec::new();
    for i in 0..20u64 {
        let handle = handle.clone();
        writers.push(tokio::spawn(async move {
            handle
                .record_trade("POP", i + 1, Side::Buy, dec!(100))
                .await
                .unwrap()
        }));
    }
    for writer in writers {
        writer.await.unwrap();
    }

    let snapshot = handle.instrument_snapshot("POP").await.unwrap().unwrap();
    assert_eq!(snapshot.trade_count, 20);
    assert_eq!(snapshot.volume_weighted_price, Some(dec!(100)));
    assert_eq!(snapshot.dividend, dec!(8));

    assert_close(handle.all_share_index().await.unwrap().unwrap(), dec!(100));

    drop(handle);
    let exchange = task.await.unwrap();
    let total: u64 = exchange
        .get_instrument("POP")
        .unwrap()
        .trades()
        .iter()
        .map(|t| t.quantity())
        .sum();
    assert_eq!(total, (1..=20).sum::<u64>());
}

#[tokio::test]
async fn test_service_survives_huge_trade() {
    let clock = market_open();
    let (handle, _task) = ExchangeService::spawn(gbce(&clock), 8);
    handle
        .add_instrument(Instrument::common("BIG", dec!(100), dec!(1), clock.clone()))
        .await
        .unwrap();

    handle
        .record_trade("BIG", u64::MAX, Side::Buy, dec!(10000000000))
        .await
        .unwrap();
    assert!(handle.volume_weighted_price("BIG").await.unwrap().is_some());
    assert!(handle.all_share_index().await.unwrap().is_some());
    assert_eq!(
        handle.pe_ratio("POP", dec!(110)).await.unwrap(),
        Some(dec!(13.75))
    );
}

#[tokio::test]
async fn test_service_reports_absent_metrics() {
    let clock = market_open();
    let (handle, _task) = ExchangeService::spawn(gbce(&clock), 8);

    assert_eq!(handle.all_share_index().await.unwrap(), None);
    assert_eq!(handle.volume_weighted_price("TEA").await.unwrap(), None);
    assert_eq!(handle.pe_ratio("TEA", dec!(110)).await.unwrap(), None);
    assert_eq!(handle.dividend_yield("GIN", dec!(0)).await.unwrap(), None);

    let err = handle
        .record_trade("GIN", 0, Side::Sell, dec!(105))
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidTrade(_)));

    assert_eq!(
        handle.symbols().await.unwrap(),
        vec!["ALE", "GIN", "JOE", "POP", "TEA"]
    );
}
