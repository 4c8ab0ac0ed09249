use market_analytics_wasm::application::AnalyticsService;
use market_analytics_wasm::domain::chart::{Chart, ChartKind};
use market_analytics_wasm::domain::market_data::PlayerName;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn demo_snapshot_is_internally_consistent() {
    let service = AnalyticsService::new();
    let snapshot = service.demo_snapshot();

    assert_eq!(snapshot.metrics.len(), 3);
    assert_eq!(snapshot.overview.active_players, 3);

    // Per-player transaction counts add up to the market total.
    let trades: usize = snapshot.metrics.values().map(|m| m.transaction_count).sum();
    assert_eq!(trades, snapshot.overview.total_trades);
    let volume: u64 = snapshot.metrics.values().map(|m| m.total_volume).sum();
    assert_eq!(volume, snapshot.overview.total_volume);

    for metrics in snapshot.metrics.values() {
        assert_eq!(metrics.price_history.len(), metrics.transaction_count);
        assert!(metrics.has_trades());
        let (lo, hi) = metrics.price_history.value_bounds().unwrap();
        assert_eq!(metrics.low_price.unwrap().value(), lo);
        assert_eq!(metrics.high_price.unwrap().value(), hi);
    }
}

#[wasm_bindgen_test]
fn demo_snapshot_is_deterministic() {
    let service = AnalyticsService::new();
    assert_eq!(service.demo_snapshot(), service.demo_snapshot());
}

#[wasm_bindgen_test]
fn charts_receive_the_series_matching_their_kind() {
    let service = AnalyticsService::new();
    let snapshot = service.demo_snapshot();
    let player = snapshot.default_player().unwrap().clone();
    let metrics = snapshot.get(&player).unwrap().clone();

    let mut price_chart = Chart::new("p".to_string(), ChartKind::PriceLine, 800, 420);
    AnalyticsService::apply_to_chart(&snapshot, &player, &mut price_chart);
    assert_eq!(price_chart.series.len(), 1);
    assert_eq!(price_chart.point_count(), metrics.price_history.len());
    assert!(price_chart.viewport.is_full_extent());

    let mut volume_chart = Chart::new("v".to_string(), ChartKind::VolumeBars, 800, 220);
    AnalyticsService::apply_to_chart(&snapshot, &player, &mut volume_chart);
    assert_eq!(volume_chart.point_count(), metrics.volume_history.len());
}

#[wasm_bindgen_test]
fn unknown_player_clears_the_chart() {
    let service = AnalyticsService::new();
    let snapshot = service.demo_snapshot();

    let mut chart = Chart::new("p".to_string(), ChartKind::PriceLine, 800, 420);
    AnalyticsService::apply_to_chart(&snapshot, &snapshot.default_player().unwrap().clone(), &mut chart);
    assert!(chart.has_data());

    AnalyticsService::apply_to_chart(&snapshot, &PlayerName::from("Nobody"), &mut chart);
    assert!(!chart.has_data());
    assert!(chart.viewport.is_degenerate());
}
