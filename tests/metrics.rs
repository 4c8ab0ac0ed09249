use market_analytics_wasm::domain::market_data::{
    OrderLevel, PlayerName, Price, ShareCount, Timestamp, Trade,
    services::{MarketAnalysisService, TradeValidationService, VOLUME_BUCKET_MS},
};
use wasm_bindgen_test::*;

fn trade(player: &str, price: f64, shares: u32, at: u64) -> Trade {
    Trade::new(
        PlayerName::from(player),
        Price::from(price),
        ShareCount::from(shares),
        Timestamp::from_millis(at),
    )
}

fn sample_trades() -> Vec<Trade> {
    vec![
        trade("Alice", 10.0, 2, 1_000),
        trade("Bob", 8.0, 1, 2_000),
        trade("Alice", 12.0, 1, 3_000),
        trade("Alice", 11.0, 3, 4_000),
    ]
}

#[wasm_bindgen_test]
fn summary_matches_backend_statistics() {
    let service = MarketAnalysisService::new();
    let alice = PlayerName::from("Alice");
    let alice_trades: Vec<Trade> = sample_trades()
        .into_iter()
        .filter(|t| t.player == alice)
        .collect();

    let summary = service.summarize(&alice_trades);
    assert_eq!(summary.last_price.unwrap().value(), 11.0);
    assert_eq!(summary.high_price.unwrap().value(), 12.0);
    assert_eq!(summary.low_price.unwrap().value(), 10.0);
    assert_eq!(summary.avg_price.unwrap().value(), 11.0);
    assert!((summary.price_change - 1.0).abs() < 1e-9);
    assert!((summary.price_change_percent - 10.0).abs() < 1e-9);
    assert_eq!(summary.total_volume, 6);
    assert_eq!(summary.transaction_count, 3);
}

#[wasm_bindgen_test]
fn single_trade_has_no_price_change() {
    let service = MarketAnalysisService::new();
    let summary = service.summarize(&[trade("Bob", 8.0, 1, 2_000)]);
    assert_eq!(summary.price_change, 0.0);
    assert_eq!(summary.price_change_percent, 0.0);
    assert_eq!(summary.last_price.unwrap().value(), 8.0);
}

#[wasm_bindgen_test]
fn empty_trade_list_yields_empty_statistics() {
    let service = MarketAnalysisService::new();
    let summary = service.summarize(&[]);
    assert!(summary.last_price.is_none());
    assert!(summary.avg_price.is_none());
    assert_eq!(summary.total_volume, 0);
    assert_eq!(summary.transaction_count, 0);
}

#[wasm_bindgen_test]
fn price_series_only_contains_the_requested_player() {
    let service = MarketAnalysisService::new();
    let series = service.price_series(&PlayerName::from("Alice"), &sample_trades());
    assert_eq!(series.len(), 3);
    let values: Vec<f64> = series.points().iter().map(|p| p.value).collect();
    assert_eq!(values, vec![10.0, 12.0, 11.0]);
}

#[wasm_bindgen_test]
fn volume_groups_into_hourly_buckets() {
    let service = MarketAnalysisService::new();
    let hour = VOLUME_BUCKET_MS;
    let trades = vec![
        trade("Alice", 10.0, 2, hour * 10 + 5_000),
        trade("Alice", 10.5, 3, hour * 10 + 1_800_000),
        trade("Alice", 11.0, 4, hour * 11 + 60_000),
        trade("Bob", 9.0, 100, hour * 10), // other player, other series
    ];

    let series = service.volume_series(&PlayerName::from("Alice"), &trades);
    assert_eq!(series.len(), 2);
    assert_eq!(series.points()[0].timestamp.value(), hour * 10);
    assert_eq!(series.points()[0].value, 5.0);
    assert_eq!(series.points()[1].timestamp.value(), hour * 11);
    assert_eq!(series.points()[1].value, 4.0);
}

#[wasm_bindgen_test]
fn spread_needs_both_sides_of_the_book() {
    let service = MarketAnalysisService::new();
    let bids = [
        OrderLevel::new(Price::from(9.0), ShareCount::from(5)),
        OrderLevel::new(Price::from(9.5), ShareCount::from(2)),
    ];
    let asks = [
        OrderLevel::new(Price::from(10.5), ShareCount::from(1)),
        OrderLevel::new(Price::from(11.0), ShareCount::from(3)),
    ];

    let bid = service.best_bid(&bids);
    let ask = service.best_ask(&asks);
    assert_eq!(bid.unwrap().value(), 9.5);
    assert_eq!(ask.unwrap().value(), 10.5);
    assert!((service.spread(bid, ask).unwrap() - 1.0).abs() < 1e-9);
    assert!(service.spread(bid, None).is_none());
    assert!(service.spread(None, ask).is_none());
}

#[wasm_bindgen_test]
fn player_metrics_composes_series_and_book() {
    let service = MarketAnalysisService::new();
    let alice = PlayerName::from("Alice");
    let bids = [
        OrderLevel::new(Price::from(9.0), ShareCount::from(5)),
        OrderLevel::new(Price::from(9.5), ShareCount::from(2)),
    ];
    let asks = [OrderLevel::new(Price::from(10.5), ShareCount::from(1))];

    let metrics = service.player_metrics(&alice, &sample_trades(), &bids, &asks);
    assert_eq!(metrics.transaction_count, 3);
    assert_eq!(metrics.total_volume, 6);
    assert_eq!(metrics.price_history.len(), 3);
    assert_eq!(metrics.highest_bid.unwrap().value(), 9.5);
    assert_eq!(metrics.lowest_ask.unwrap().value(), 10.5);
    // Bids come back best-first.
    assert_eq!(metrics.order_book.bids[0].price.value(), 9.5);
    assert!(metrics.has_trades());
}

#[wasm_bindgen_test]
fn overview_counts_the_whole_market() {
    let service = MarketAnalysisService::new();
    let overview = service.market_overview(&sample_trades(), 3);
    assert_eq!(overview.total_trades, 4);
    assert_eq!(overview.total_volume, 7);
    assert_eq!(overview.active_players, 3);
}

#[wasm_bindgen_test]
fn validation_rejects_malformed_trades() {
    let validation = TradeValidationService::new();
    assert!(validation.validate_trade(&trade("Alice", 10.0, 1, 0)).is_ok());
    assert!(validation.validate_trade(&trade("Alice", 0.0, 1, 0)).is_err());
    assert!(validation.validate_trade(&trade("Alice", -4.0, 1, 0)).is_err());
    assert!(validation.validate_trade(&trade("Alice", 10.0, 0, 0)).is_err());
}

#[wasm_bindgen_test]
fn validation_accepts_same_millisecond_trades_but_not_regressions() {
    let validation = TradeValidationService::new();
    let ordered = vec![
        trade("Alice", 10.0, 1, 1_000),
        trade("Bob", 11.0, 1, 1_000),
        trade("Alice", 12.0, 1, 2_000),
    ];
    assert!(validation.validate_trade_sequence(&ordered).is_ok());

    let regressed = vec![
        trade("Alice", 10.0, 1, 2_000),
        trade("Bob", 11.0, 1, 1_000),
    ];
    assert!(validation.validate_trade_sequence(&regressed).is_err());
}
